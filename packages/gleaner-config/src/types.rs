use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub engine: Engine,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Engine {
	pub url: String,
	pub index: String,
	#[serde(default = "default_dialect")]
	pub dialect: String,
	pub timeout_ms: u64,
	/// Optional. Sent as `Authorization: ApiKey <key>` when present.
	pub api_key: Option<String>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Bucket cap for facets ordered by document count.
	pub bucket_limit: u32,
	/// Bucket cap for facets ordered alphanumerically; these enumerate small vocabularies.
	pub alphanumeric_bucket_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { bucket_limit: 10, alphanumeric_bucket_limit: 1_000 }
	}
}

/// Snapshot of the externally-owned lookup data: element definitions, boosts and content services.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
	pub elements: Vec<ElementDef>,
	pub boosts: Vec<BoostDef>,
	pub services: Vec<ContentServiceDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementDef {
	pub name: String,
	pub label: Option<String>,
	#[serde(default = "default_data_type")]
	pub data_type: String,
	#[serde(default = "default_element_source")]
	pub source: String,
	#[serde(default)]
	pub searchable: bool,
	#[serde(default)]
	pub sortable: bool,
	#[serde(default)]
	pub facetable: bool,
	#[serde(default = "default_facet_order")]
	pub facet_order: String,
	#[serde(default)]
	pub weight: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoostDef {
	pub field: String,
	pub value: String,
	pub strength: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentServiceDef {
	pub key: String,
	pub name: String,
	pub uri: Option<String>,
}

fn default_dialect() -> String {
	"modern".to_string()
}

fn default_data_type() -> String {
	"string".to_string()
}

fn default_element_source() -> String {
	"local".to_string()
}

fn default_facet_order() -> String {
	"count".to_string()
}
