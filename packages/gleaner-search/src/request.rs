use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterInput, FilterMap, FilterValue};
use gleaner_domain::{Element, fields::SEARCH_ALL};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}
impl SortDirection {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
	pub field: String,
	pub direction: SortDirection,
}
impl SortOrder {
	pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
		Self { field: field.into(), direction }
	}

	pub fn by_element(element: &Element, direction: SortDirection) -> Self {
		Self::new(element.sort_field(), direction)
	}

	/// Parses `"field"` or `"field:asc|desc"`. Unknown directions sort ascending.
	pub fn parse(raw: &str) -> Option<Self> {
		let (field, direction) = match raw.rsplit_once(':') {
			Some((field, direction)) => (field, direction),
			None => (raw, "asc"),
		};
		let field = field.trim();

		if field.is_empty() {
			return None;
		}

		let direction = match direction.trim().to_ascii_lowercase().as_str() {
			"desc" => SortDirection::Desc,
			_ => SortDirection::Asc,
		};

		Some(Self::new(field, direction))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
	/// Index field searched; the synthetic all-fields field when querying everything.
	pub field: String,
	pub text: String,
}

/// Parameters of one search request.
///
/// Configuration calls take and return the request by value, so a request has exactly one owner
/// while it is being assembled and is frozen once handed to a [`crate::Finder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
	pub(crate) query: Option<TextQuery>,
	pub(crate) filters: FilterMap,
	pub(crate) excludes: FilterMap,
	pub(crate) content_service: Option<String>,
	pub(crate) include_variants: BTreeSet<String>,
	pub(crate) exclude_variants: BTreeSet<String>,
	pub(crate) include_children: bool,
	pub(crate) orders: Vec<SortOrder>,
	pub(crate) start: u64,
	pub(crate) limit: Option<u64>,
	pub(crate) aggregations: bool,
	pub(crate) bucket_limit: Option<u32>,
}
impl SearchRequest {
	pub fn new() -> Self {
		Self {
			query: None,
			filters: FilterMap::new(),
			excludes: FilterMap::new(),
			content_service: None,
			include_variants: BTreeSet::new(),
			exclude_variants: BTreeSet::new(),
			include_children: false,
			orders: Vec::new(),
			start: 0,
			limit: None,
			aggregations: true,
			bucket_limit: None,
		}
	}

	/// Searches every searchable element.
	pub fn query(self, text: impl Into<String>) -> Self {
		self.query_field(SEARCH_ALL, text)
	}

	pub fn query_element(self, element: &Element, text: impl Into<String>) -> Self {
		let field = element.indexed_field();

		self.query_field(field, text)
	}

	pub fn query_field(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
		self.query = Some(TextQuery { field: field.into(), text: text.into() });

		self
	}

	pub fn filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		self.filters.insert(field.into(), value.into());

		self
	}

	/// Merges normalized filter input; fields already present are replaced.
	pub fn filters(mut self, input: impl Into<FilterInput>) -> Self {
		self.filters.extend(input.into().normalize());

		self
	}

	pub fn exclude(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		self.excludes.insert(field.into(), value.into());

		self
	}

	pub fn excludes(mut self, input: impl Into<FilterInput>) -> Self {
		self.excludes.extend(input.into().normalize());

		self
	}

	pub fn content_service(mut self, key: impl Into<String>) -> Self {
		self.content_service = Some(key.into());

		self
	}

	pub fn include_variants<I, S>(mut self, variants: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.include_variants.extend(variants.into_iter().map(Into::into));

		self
	}

	pub fn exclude_variants<I, S>(mut self, variants: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude_variants.extend(variants.into_iter().map(Into::into));

		self
	}

	pub fn include_children(mut self, include: bool) -> Self {
		self.include_children = include;

		self
	}

	/// Replaces the sort list.
	pub fn order(mut self, orders: impl IntoIterator<Item = SortOrder>) -> Self {
		self.orders = orders.into_iter().collect();

		self
	}

	pub fn start(mut self, start: u64) -> Self {
		self.start = start;

		self
	}

	pub fn limit(mut self, limit: u64) -> Self {
		self.limit = Some(limit);

		self
	}

	/// One-based page window. Page 0 is treated as page 1.
	pub fn page(self, number: u64, per_page: u64) -> Self {
		let start = number.max(1).saturating_sub(1).saturating_mul(per_page);

		self.start(start).limit(per_page)
	}

	pub fn aggregations(mut self, enabled: bool) -> Self {
		self.aggregations = enabled;

		self
	}

	/// Per-request cap for by-count facets. Zero keeps the configured cap.
	pub fn bucket_limit(mut self, limit: u32) -> Self {
		self.bucket_limit = Some(limit);

		self
	}

	pub fn text_query(&self) -> Option<&TextQuery> {
		self.query.as_ref()
	}

	pub fn filter_map(&self) -> &FilterMap {
		&self.filters
	}

	pub fn exclude_map(&self) -> &FilterMap {
		&self.excludes
	}

	pub fn orders(&self) -> &[SortOrder] {
		&self.orders
	}

	pub fn window(&self) -> (u64, Option<u64>) {
		(self.start, self.limit)
	}

	pub fn aggregations_enabled(&self) -> bool {
		self.aggregations
	}

	/// True when the caller scoped variants, which makes a variant facet redundant.
	pub fn constrains_variants(&self) -> bool {
		!self.include_variants.is_empty() || !self.exclude_variants.is_empty()
	}
}
impl Default for SearchRequest {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn order_replaces_previous_list() {
		let request = SearchRequest::new()
			.order([SortOrder::new("local_title.sort", SortDirection::Asc)])
			.order([SortOrder::new("date_issued", SortDirection::Desc)]);

		assert_eq!(request.orders(), &[SortOrder::new("date_issued", SortDirection::Desc)]);
	}

	#[test]
	fn parses_sort_orders() {
		assert_eq!(
			SortOrder::parse("date_issued:DESC"),
			Some(SortOrder::new("date_issued", SortDirection::Desc))
		);
		assert_eq!(
			SortOrder::parse("local_title.sort"),
			Some(SortOrder::new("local_title.sort", SortDirection::Asc))
		);
		assert_eq!(
			SortOrder::parse("_score:sideways"),
			Some(SortOrder::new("_score", SortDirection::Asc))
		);
		assert_eq!(SortOrder::parse(" :desc"), None);
	}

	#[test]
	fn page_computes_window() {
		assert_eq!(SearchRequest::new().page(3, 20).window(), (40, Some(20)));
		assert_eq!(SearchRequest::new().page(0, 20).window(), (0, Some(20)));
	}

	#[test]
	fn defaults_match_browse_behavior() {
		let request = SearchRequest::new();

		assert!(request.aggregations_enabled());
		assert!(!request.include_children);
		assert_eq!(request.window(), (0, None));
		assert!(request.text_query().is_none());
	}

	#[test]
	fn filters_from_pairs_merge_with_explicit_filters() {
		let request = SearchRequest::new()
			.filter("variant", "item")
			.filters(vec!["service_key:abc".to_string()]);

		assert_eq!(request.filter_map().len(), 2);
	}
}
