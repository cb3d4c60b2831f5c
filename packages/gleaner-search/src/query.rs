use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::{
	filter::{FilterMap, FilterValue},
	request::{SearchRequest, TextQuery},
	settings::SearchSettings,
};
use gleaner_domain::{
	BoostTable, ElementRegistry, FacetOrder, MAX_BOOST,
	fields::{PARENT_ID, SCORE, SERVICE_KEY, VARIANT},
};

/// Query-string text matching every document.
pub const MATCH_ALL_TEXT: &str = "*";

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"[^\p{L}\p{N}\s]").expect("Non-word pattern must compile.")
});
static WHITESPACE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("Whitespace pattern must compile."));

/// Turns a request into the engine's query document.
///
/// Reads the registry and boost table but never mutates them, and never fails: every request
/// state has a valid document.
pub struct QueryBuilder<'a> {
	settings: &'a SearchSettings,
	elements: &'a ElementRegistry,
	boosts: &'a BoostTable,
}
impl<'a> QueryBuilder<'a> {
	pub fn new(
		settings: &'a SearchSettings,
		elements: &'a ElementRegistry,
		boosts: &'a BoostTable,
	) -> Self {
		Self { settings, elements, boosts }
	}

	pub fn build(&self, request: &SearchRequest) -> Value {
		let mut body = Map::new();

		body.insert("query".to_string(), self.scored_query(request));

		if request.aggregations
			&& let Some(aggregations) = self.aggregations(request)
		{
			body.insert("aggregations".to_string(), aggregations);
		}
		if !request.orders.is_empty() {
			let sort = request
				.orders
				.iter()
				.map(|order| {
					let direction = order.direction.as_str();

					// Score sorts reject `unmapped_type`.
					if order.field == SCORE {
						return serde_json::json!({ SCORE: { "order": direction } });
					}

					serde_json::json!({
						order.field.as_str(): { "order": direction, "unmapped_type": "keyword" }
					})
				})
				.collect();

			body.insert("sort".to_string(), Value::Array(sort));
		}
		if request.start > 0 || self.settings.dialect.always_emits_from() {
			body.insert("from".to_string(), Value::from(request.start));
		}
		if let Some(limit) = request.limit {
			body.insert("size".to_string(), Value::from(limit));
		}

		Value::Object(body)
	}

	fn scored_query(&self, request: &SearchRequest) -> Value {
		let functions: Vec<Value> = self
			.boosts
			.iter()
			.map(|boost| {
				serde_json::json!({
					"filter": term(boost.field(), boost.value()),
					"weight": boost.strength().clamp(-MAX_BOOST, MAX_BOOST),
				})
			})
			.collect();
		let mut function_score = Map::new();

		function_score.insert("query".to_string(), bool_query(request));

		if !functions.is_empty() {
			function_score.insert("functions".to_string(), Value::Array(functions));
		}

		function_score.insert("score_mode".to_string(), Value::from("max"));
		function_score.insert("boost_mode".to_string(), Value::from("multiply"));
		function_score.insert("max_boost".to_string(), Value::from(MAX_BOOST));
		function_score.insert("boost".to_string(), Value::from(MAX_BOOST));

		serde_json::json!({ "function_score": function_score })
	}

	fn aggregations(&self, request: &SearchRequest) -> Option<Value> {
		let bucket_limit = request
			.bucket_limit
			.filter(|limit| *limit > 0)
			.unwrap_or(self.settings.bucket_limit);
		let mut aggregations = Map::new();

		for element in self.elements.facetable() {
			if element.is_variant() && request.constrains_variants() {
				continue;
			}

			let field = element.facet_field();
			let terms = match element.facet_order {
				FacetOrder::Alphanumeric => serde_json::json!({
					"field": field,
					"size": self.settings.alphanumeric_bucket_limit.max(bucket_limit),
					"order": { self.settings.dialect.key_order(): "asc" },
				}),
				FacetOrder::ByCount => serde_json::json!({
					"field": field,
					"size": bucket_limit,
					"order": { "_count": "desc" },
				}),
			};

			aggregations.insert(field, serde_json::json!({ "terms": terms }));
		}

		if aggregations.is_empty() { None } else { Some(Value::Object(aggregations)) }
	}
}

/// Strips everything but letters, numbers and whitespace, collapsing runs of whitespace.
pub fn normalize_text(text: &str) -> String {
	let stripped = NON_WORD.replace_all(text, "");

	WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Query-string expression for normalized text: exact or prefix match, or match-all when blank.
pub fn query_string_text(text: &str) -> String {
	let normalized = normalize_text(text);

	if normalized.is_empty() {
		return MATCH_ALL_TEXT.to_string();
	}

	format!("({normalized} OR {normalized}*)")
}

fn bool_query(request: &SearchRequest) -> Value {
	let must = match &request.query {
		Some(query) => vec![text_clause(query)],
		None => vec![serde_json::json!({ "match_all": {} })],
	};
	let mut filter = filter_clauses(&request.filters);
	let mut must_not = filter_clauses(&request.excludes);

	if let Some(service) = &request.content_service {
		filter.push(term(SERVICE_KEY, service));
	}
	if !request.include_variants.is_empty() {
		filter.push(terms(VARIANT, request.include_variants.iter()));
	}
	if !request.exclude_variants.is_empty() {
		must_not.push(terms(VARIANT, request.exclude_variants.iter()));
	}
	if !request.include_children {
		must_not.push(serde_json::json!({ "exists": { "field": PARENT_ID } }));
	}

	let mut clauses = Map::new();

	clauses.insert("must".to_string(), Value::Array(must));

	if !filter.is_empty() {
		clauses.insert("filter".to_string(), Value::Array(filter));
	}
	if !must_not.is_empty() {
		clauses.insert("must_not".to_string(), Value::Array(must_not));
	}

	serde_json::json!({ "bool": clauses })
}

fn text_clause(query: &TextQuery) -> Value {
	serde_json::json!({
		"query_string": {
			"query": query_string_text(&query.text),
			"default_field": query.field,
			"default_operator": "AND",
			"lenient": true,
		}
	})
}

fn filter_clauses(filters: &FilterMap) -> Vec<Value> {
	filters
		.iter()
		.filter_map(|(field, value)| match value {
			FilterValue::One(value) => Some(term(field, value)),
			FilterValue::Many(values) if values.is_empty() => None,
			FilterValue::Many(values) => Some(terms(field, values.iter())),
		})
		.collect()
}

fn term(field: &str, value: &str) -> Value {
	serde_json::json!({ "term": { field: value } })
}

fn terms<'a>(field: &str, values: impl Iterator<Item = &'a String>) -> Value {
	let values: Vec<&String> = values.collect();

	serde_json::json!({ "terms": { field: values } })
}
