use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter value: a scalar requires an exact match, a list matches any of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
	One(String),
	Many(Vec<String>),
}
impl FilterValue {
	fn push(self, value: String) -> Self {
		match self {
			Self::One(existing) if existing == value => Self::One(existing),
			Self::One(existing) => Self::Many(vec![existing, value]),
			Self::Many(mut values) => {
				if !values.contains(&value) {
					values.push(value);
				}

				Self::Many(values)
			},
		}
	}
}
impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		Self::One(value.to_string())
	}
}
impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		Self::One(value)
	}
}
impl From<Vec<String>> for FilterValue {
	fn from(values: Vec<String>) -> Self {
		Self::Many(values)
	}
}
impl From<Vec<&str>> for FilterValue {
	fn from(values: Vec<&str>) -> Self {
		Self::Many(values.into_iter().map(str::to_string).collect())
	}
}
impl<const N: usize> From<[&str; N]> for FilterValue {
	fn from(values: [&str; N]) -> Self {
		Self::Many(values.into_iter().map(str::to_string).collect())
	}
}

/// Index field name to filter value. Ordered so built documents are deterministic.
pub type FilterMap = BTreeMap<String, FilterValue>;

/// Filter parameters as controllers receive them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterInput {
	/// One `"field:value"` pair.
	Single(String),
	/// Several `"field:value"` pairs; repeated fields collect into a list.
	List(Vec<String>),
	Map(FilterMap),
}
impl FilterInput {
	/// Converges every input shape on the internal filter map.
	///
	/// Pairs without a colon, or with a blank field or value, are skipped.
	pub fn normalize(self) -> FilterMap {
		match self {
			Self::Single(pair) => collect_pairs(std::iter::once(pair)),
			Self::List(pairs) => collect_pairs(pairs),
			Self::Map(map) => map,
		}
	}
}
impl From<&str> for FilterInput {
	fn from(pair: &str) -> Self {
		Self::Single(pair.to_string())
	}
}
impl From<Vec<String>> for FilterInput {
	fn from(pairs: Vec<String>) -> Self {
		Self::List(pairs)
	}
}
impl From<FilterMap> for FilterInput {
	fn from(map: FilterMap) -> Self {
		Self::Map(map)
	}
}

fn collect_pairs(pairs: impl IntoIterator<Item = String>) -> FilterMap {
	let mut map = FilterMap::new();

	for pair in pairs {
		let Some((field, value)) = split_pair(&pair) else {
			continue;
		};
		let next = match map.remove(field) {
			Some(existing) => existing.push(value.to_string()),
			None => FilterValue::One(value.to_string()),
		};

		map.insert(field.to_string(), next);
	}

	map
}

fn split_pair(pair: &str) -> Option<(&str, &str)> {
	let (field, value) = pair.split_once(':')?;
	let field = field.trim();
	let value = value.trim();

	if field.is_empty() || value.is_empty() {
		return None;
	}

	Some((field, value))
}
