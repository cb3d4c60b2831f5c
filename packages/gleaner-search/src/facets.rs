use serde_json::Value;

use crate::response;
use gleaner_domain::{Bucket, ElementRegistry, Facet, ServiceDirectory};

/// Builds facets for every facetable element whose aggregation is present in the response.
///
/// Facets follow element weight; buckets keep the engine's order.
pub fn assemble(
	response: &Value,
	elements: &ElementRegistry,
	services: &ServiceDirectory,
) -> Vec<Facet> {
	let mut facets = Vec::new();

	for element in elements.facetable() {
		let field = element.facet_field();
		let Some(raw_buckets) = response::buckets(response, &field) else {
			continue;
		};
		let buckets = raw_buckets
			.iter()
			.filter_map(|raw| {
				let name = bucket_key(raw.get("key")?)?;
				let label = if element.is_service_key() {
					services.display_name(&name).to_string()
				} else {
					name.clone()
				};
				let count = raw.get("doc_count").and_then(Value::as_u64).unwrap_or(0);

				Some(Bucket { name, label, count })
			})
			.collect();

		facets.push(Facet { name: element.label.clone(), field, buckets });
	}

	facets
}

fn bucket_key(key: &Value) -> Option<String> {
	match key {
		Value::String(key) => Some(key.clone()),
		Value::Number(key) => Some(key.to_string()),
		Value::Bool(key) => Some(key.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use gleaner_domain::{
		ContentService, Element, ElementSource, FacetOrder, UNKNOWN_SERVICE, fields::SERVICE_KEY,
	};

	fn elements() -> ElementRegistry {
		ElementRegistry::new(vec![
			Element::new("creator", ElementSource::Local)
				.label("Creator")
				.facetable(FacetOrder::ByCount)
				.weight(2),
			Element::new(SERVICE_KEY, ElementSource::System)
				.label("Service")
				.facetable(FacetOrder::ByCount)
				.weight(1),
		])
		.expect("registry")
	}

	fn services() -> ServiceDirectory {
		ServiceDirectory::new([ContentService {
			key: "abc".to_string(),
			name: "Digital Collections".to_string(),
			uri: None,
		}])
	}

	#[test]
	fn facets_follow_weight_and_resolve_service_labels() {
		let response = serde_json::json!({
			"aggregations": {
				"local_creator.keyword": { "buckets": [
					{ "key": "Smith", "doc_count": 7 },
					{ "key": "Jones", "doc_count": 3 },
				] },
				"service_key": { "buckets": [
					{ "key": "abc", "doc_count": 9 },
					{ "key": "unknownkey", "doc_count": 1 },
				] },
			}
		});
		let facets = assemble(&response, &elements(), &services());

		assert_eq!(facets.len(), 2);
		assert_eq!(facets[0].name, "Service");
		assert_eq!(facets[0].buckets[0].label, "Digital Collections");
		assert_eq!(facets[0].buckets[1].label, UNKNOWN_SERVICE);
		assert_eq!(facets[0].buckets[1].count, 1);
		assert_eq!(facets[1].field, "local_creator.keyword");
		assert_eq!(
			facets[1].buckets.iter().map(|bucket| bucket.name.as_str()).collect::<Vec<_>>(),
			vec!["Smith", "Jones"]
		);
	}

	#[test]
	fn numeric_keys_are_stringified() {
		let response = serde_json::json!({
			"aggregations": { "local_creator.keyword": { "buckets": [
				{ "key": 1999, "doc_count": 2 },
			] } }
		});
		let facets = assemble(&response, &elements(), &services());

		assert_eq!(facets[0].buckets[0].name, "1999");
		assert_eq!(facets[0].buckets[0].label, "1999");
	}

	#[test]
	fn missing_aggregations_yield_no_facets() {
		assert!(assemble(&serde_json::json!({ "hits": {} }), &elements(), &services()).is_empty());
	}
}
