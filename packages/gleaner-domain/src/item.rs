use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
	Error, Result,
	element::{ElementRegistry, ElementSource},
	fields::{ELEMENTS, INDEX_ID, PARENT_ID, SERVICE_KEY, SOURCE_URI, VARIANT},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemElement {
	pub name: String,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
	pub index_id: String,
	pub source_uri: String,
	pub service_key: Option<String>,
	pub variant: Option<String>,
	pub parent_id: Option<String>,
	pub elements: Vec<ItemElement>,
}
impl Item {
	/// Builds an item, dropping repeated `{name, value}` pairs and rejecting invalid shapes.
	pub fn new(
		index_id: impl Into<String>,
		source_uri: impl Into<String>,
		elements: impl IntoIterator<Item = ItemElement>,
	) -> Result<Self> {
		let item = Self {
			index_id: index_id.into(),
			source_uri: source_uri.into(),
			service_key: None,
			variant: None,
			parent_id: None,
			elements: dedup(elements),
		};

		item.validate()?;

		Ok(item)
	}

	pub fn validate(&self) -> Result<()> {
		if self.index_id.trim().is_empty() {
			return Err(Error::InvalidDocument {
				message: "index_id must be non-empty.".to_string(),
			});
		}
		if self.source_uri.trim().is_empty() {
			return Err(Error::InvalidDocument {
				message: format!("{} has an empty source_uri.", self.index_id),
			});
		}
		if self.elements.is_empty() {
			return Err(Error::InvalidDocument {
				message: format!("{} has no elements.", self.index_id),
			});
		}

		Ok(())
	}

	/// Decodes a stored `_source` document, mapping indexed fields back to element names.
	pub fn from_source(source: &Map<String, Value>, registry: &ElementRegistry) -> Result<Self> {
		let index_id = scalar(source.get(INDEX_ID)).unwrap_or_default();
		let source_uri = scalar(source.get(SOURCE_URI)).unwrap_or_default();

		if index_id.trim().is_empty() {
			return Err(Error::InvalidDocument {
				message: "document is missing index_id.".to_string(),
			});
		}
		if source_uri.trim().is_empty() {
			return Err(Error::InvalidDocument {
				message: format!("{index_id} is missing source_uri."),
			});
		}

		let mut elements = Vec::new();

		if let Some(inline) = source.get(ELEMENTS).and_then(Value::as_array) {
			for entry in inline {
				let name = scalar(entry.get("name"));
				let value = scalar(entry.get("value"));

				if let (Some(name), Some(value)) = (name, value) {
					elements.push(ItemElement { name, value });
				}
			}
		}

		let indexed =
			registry.all().iter().filter(|element| element.source != ElementSource::System);

		for element in indexed {
			let Some(raw) = source.get(&element.indexed_field()) else {
				continue;
			};

			for value in values(raw) {
				elements.push(ItemElement { name: element.name.clone(), value });
			}
		}

		let item = Self {
			index_id,
			source_uri,
			service_key: scalar(source.get(SERVICE_KEY)),
			variant: scalar(source.get(VARIANT)),
			parent_id: scalar(source.get(PARENT_ID)),
			elements: dedup(elements),
		};

		item.validate()?;

		Ok(item)
	}

	pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
		self.elements.iter().filter(move |element| element.name == name).map(|e| e.value.as_str())
	}
}

fn dedup(elements: impl IntoIterator<Item = ItemElement>) -> Vec<ItemElement> {
	let mut seen = HashSet::new();

	elements.into_iter().filter(|element| seen.insert(element.clone())).collect()
}

fn scalar(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

fn values(raw: &Value) -> Vec<String> {
	match raw {
		Value::Array(items) => items.iter().filter_map(|item| scalar(Some(item))).collect(),
		other => scalar(Some(other)).into_iter().collect(),
	}
}
