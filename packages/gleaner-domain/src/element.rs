use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
	Error, Result,
	fields::{
		DATE_PREFIX, KEYWORD_SUFFIX, LOCAL_PREFIX, SERVICE_KEY, SORT_SUFFIX, SOURCE_PREFIX, VARIANT,
	},
};
use gleaner_config::ElementDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
	String,
	Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetOrder {
	ByCount,
	Alphanumeric,
}

/// Vocabulary an element belongs to. Each one owns a distinct index field prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementSource {
	/// Locally defined, mapped element.
	Local,
	/// As-harvested element copied from a content service without mapping.
	Source,
	/// Document bookkeeping field indexed under its bare name.
	System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
	pub name: String,
	pub label: String,
	pub data_type: DataType,
	pub source: ElementSource,
	pub searchable: bool,
	pub sortable: bool,
	pub facetable: bool,
	pub facet_order: FacetOrder,
	pub weight: i32,
}
impl Element {
	pub fn new(name: impl Into<String>, source: ElementSource) -> Self {
		let name = name.into();

		Self {
			label: name.clone(),
			name,
			data_type: DataType::String,
			source,
			searchable: false,
			sortable: false,
			facetable: false,
			facet_order: FacetOrder::ByCount,
			weight: 0,
		}
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();

		self
	}

	pub fn data_type(mut self, data_type: DataType) -> Self {
		self.data_type = data_type;

		self
	}

	pub fn searchable(mut self) -> Self {
		self.searchable = true;

		self
	}

	pub fn sortable(mut self) -> Self {
		self.sortable = true;

		self
	}

	pub fn facetable(mut self, order: FacetOrder) -> Self {
		self.facetable = true;
		self.facet_order = order;

		self
	}

	pub fn weight(mut self, weight: i32) -> Self {
		self.weight = weight;

		self
	}

	/// Text-indexed field holding the element's values.
	pub fn indexed_field(&self) -> String {
		match (self.source, self.data_type) {
			(ElementSource::System, _) => self.name.clone(),
			(ElementSource::Source, _) => format!("{SOURCE_PREFIX}{}", self.name),
			(ElementSource::Local, DataType::Date) => format!("{DATE_PREFIX}{}", self.name),
			(ElementSource::Local, DataType::String) => format!("{LOCAL_PREFIX}{}", self.name),
		}
	}

	/// Exact-match field used by term filters and facet aggregations.
	pub fn keyword_field(&self) -> String {
		self.suffixed(KEYWORD_SUFFIX)
	}

	pub fn facet_field(&self) -> String {
		self.keyword_field()
	}

	pub fn sort_field(&self) -> String {
		self.suffixed(SORT_SUFFIX)
	}

	pub fn is_service_key(&self) -> bool {
		self.source == ElementSource::System && self.name == SERVICE_KEY
	}

	pub fn is_variant(&self) -> bool {
		self.source == ElementSource::System && self.name == VARIANT
	}

	fn suffixed(&self, suffix: &str) -> String {
		match (self.source, self.data_type) {
			(ElementSource::System, _) | (ElementSource::Local, DataType::Date) =>
				self.indexed_field(),
			_ => format!("{}{suffix}", self.indexed_field()),
		}
	}
}
impl TryFrom<&ElementDef> for Element {
	type Error = Error;

	fn try_from(def: &ElementDef) -> Result<Self> {
		let data_type = match def.data_type.as_str() {
			"string" => DataType::String,
			"date" => DataType::Date,
			other => {
				return Err(Error::InvalidElement {
					message: format!("unknown data type '{other}' for {}.", def.name),
				});
			},
		};
		let source = match def.source.as_str() {
			"local" => ElementSource::Local,
			"source" => ElementSource::Source,
			"system" => ElementSource::System,
			other => {
				return Err(Error::InvalidElement {
					message: format!("unknown source '{other}' for {}.", def.name),
				});
			},
		};
		let facet_order = match def.facet_order.as_str() {
			"count" => FacetOrder::ByCount,
			"alphanumeric" => FacetOrder::Alphanumeric,
			other => {
				return Err(Error::InvalidElement {
					message: format!("unknown facet order '{other}' for {}.", def.name),
				});
			},
		};

		Ok(Self {
			name: def.name.clone(),
			label: def.label.clone().unwrap_or_else(|| def.name.clone()),
			data_type,
			source,
			searchable: def.searchable,
			sortable: def.sortable,
			facetable: def.facetable,
			facet_order,
			weight: def.weight,
		})
	}
}

/// Ordered, read-only set of element descriptors.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
	elements: Vec<Element>,
}
impl ElementRegistry {
	pub fn new(elements: Vec<Element>) -> Result<Self> {
		let mut seen = HashSet::new();

		for element in &elements {
			if !seen.insert(element.name.as_str()) {
				return Err(Error::DuplicateElement { name: element.name.clone() });
			}
		}

		Ok(Self { elements })
	}

	pub fn from_defs(defs: &[ElementDef]) -> Result<Self> {
		let elements = defs.iter().map(Element::try_from).collect::<Result<Vec<_>>>()?;

		Self::new(elements)
	}

	pub fn all(&self) -> &[Element] {
		&self.elements
	}

	pub fn find(&self, name: &str) -> Option<&Element> {
		self.elements.iter().find(|element| element.name == name)
	}

	pub fn searchable(&self) -> impl Iterator<Item = &Element> {
		self.elements.iter().filter(|element| element.searchable)
	}

	pub fn sortable(&self) -> impl Iterator<Item = &Element> {
		self.elements.iter().filter(|element| element.sortable)
	}

	/// Facetable elements ordered by weight; ties keep registry order.
	pub fn facetable(&self) -> Vec<&Element> {
		let mut out: Vec<_> = self.elements.iter().filter(|element| element.facetable).collect();

		out.sort_by_key(|element| element.weight);

		out
	}
}
