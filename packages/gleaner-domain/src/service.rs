use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gleaner_config::ContentServiceDef;

/// Bucket label used when a service key has no registered content service.
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentService {
	pub key: String,
	pub name: String,
	pub uri: Option<String>,
}
impl From<&ContentServiceDef> for ContentService {
	fn from(def: &ContentServiceDef) -> Self {
		Self { key: def.key.clone(), name: def.name.clone(), uri: def.uri.clone() }
	}
}

/// Lookup of content services by key.
#[derive(Debug, Clone, Default)]
pub struct ServiceDirectory {
	services: HashMap<String, ContentService>,
}
impl ServiceDirectory {
	pub fn new(services: impl IntoIterator<Item = ContentService>) -> Self {
		Self {
			services: services.into_iter().map(|service| (service.key.clone(), service)).collect(),
		}
	}

	pub fn from_defs(defs: &[ContentServiceDef]) -> Self {
		Self::new(defs.iter().map(ContentService::from))
	}

	pub fn get(&self, key: &str) -> Option<&ContentService> {
		self.services.get(key)
	}

	pub fn display_name(&self, key: &str) -> &str {
		self.get(key).map(|service| service.name.as_str()).unwrap_or(UNKNOWN_SERVICE)
	}
}
