use std::sync::Arc;

use serde_json::Value;

use gleaner_domain::{
	Boost, BoostTable, CatalogSnapshot, ContentService, DataType, Element, ElementRegistry,
	ElementSource, FacetOrder, ServiceDirectory,
	fields::{SERVICE_KEY, VARIANT},
};
use gleaner_search::{SearchService, SearchSettings, SearchTransport};

pub const SERVICE_KEY_A: &str = "a1b2c3";
pub const SERVICE_NAME_A: &str = "Digital Collections";

pub fn elements() -> ElementRegistry {
	let elements = vec![
		Element::new(SERVICE_KEY, ElementSource::System)
			.label("Service")
			.facetable(FacetOrder::ByCount)
			.weight(0),
		Element::new(VARIANT, ElementSource::System)
			.label("Type")
			.facetable(FacetOrder::Alphanumeric)
			.weight(1),
		Element::new("title", ElementSource::Local)
			.label("Title")
			.searchable()
			.sortable()
			.weight(2),
		Element::new("creator", ElementSource::Local)
			.label("Creator")
			.searchable()
			.sortable()
			.facetable(FacetOrder::ByCount)
			.weight(3),
		Element::new("issued", ElementSource::Local)
			.label("Date")
			.data_type(DataType::Date)
			.sortable()
			.weight(4),
		Element::new("subject", ElementSource::Source)
			.label("Subject")
			.searchable()
			.facetable(FacetOrder::ByCount)
			.weight(5),
	];

	ElementRegistry::new(elements).expect("Fixture elements must be unique.")
}

pub fn boosts() -> BoostTable {
	BoostTable::new(vec![
		Boost::new("source_subject.keyword", "Featured", 5).expect("Fixture boost must be valid."),
		Boost::new(VARIANT, "collection", -2).expect("Fixture boost must be valid."),
	])
	.expect("Fixture boosts must be unique.")
}

pub fn services() -> ServiceDirectory {
	ServiceDirectory::new([ContentService {
		key: SERVICE_KEY_A.to_string(),
		name: SERVICE_NAME_A.to_string(),
		uri: Some("https://collections.example.org".to_string()),
	}])
}

pub fn catalog() -> CatalogSnapshot {
	CatalogSnapshot::new(elements(), boosts(), services())
}

pub fn service(settings: SearchSettings, transport: Arc<dyn SearchTransport>) -> SearchService {
	SearchService::with_transport(settings, Arc::new(catalog()), transport)
}

/// Hit whose `_source` carries identity, source URI and one title element.
pub fn hit(index_id: &str) -> Value {
	serde_json::json!({
		"_index": "gleaner",
		"_id": index_id,
		"_score": 1.0,
		"_source": {
			"index_id": index_id,
			"source_uri": format!("http://example.org/{index_id}"),
			"service_key": SERVICE_KEY_A,
			"variant": "item",
			"local_title": format!("Title of {index_id}"),
		},
	})
}

/// Modern-shaped response: `hits.total` as `{ "value": n }`.
pub fn response(total: u64, hits: Vec<Value>) -> Value {
	serde_json::json!({
		"took": 3,
		"timed_out": false,
		"hits": { "total": { "value": total, "relation": "eq" }, "hits": hits },
	})
}

/// Legacy-shaped response: `hits.total` as a bare integer.
pub fn legacy_response(total: u64, hits: Vec<Value>) -> Value {
	serde_json::json!({
		"took": 3,
		"timed_out": false,
		"hits": { "total": total, "hits": hits },
	})
}

pub fn with_aggregations(mut response: Value, aggregations: Value) -> Value {
	if let Some(object) = response.as_object_mut() {
		object.insert("aggregations".to_string(), aggregations);
	}

	response
}
