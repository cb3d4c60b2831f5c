pub mod boost;
pub mod element;
pub mod facet;
pub mod fields;
pub mod item;
pub mod service;

mod error;

pub use boost::{Boost, BoostTable, MAX_BOOST};
pub use element::{DataType, Element, ElementRegistry, ElementSource, FacetOrder};
pub use error::{Error, Result};
pub use facet::{Bucket, Facet};
pub use item::{Item, ItemElement};
pub use service::{ContentService, ServiceDirectory, UNKNOWN_SERVICE};

use gleaner_config::Catalog;

/// Validated, read-only lookup data shared by every search request.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
	pub elements: ElementRegistry,
	pub boosts: BoostTable,
	pub services: ServiceDirectory,
}
impl CatalogSnapshot {
	pub fn new(elements: ElementRegistry, boosts: BoostTable, services: ServiceDirectory) -> Self {
		Self { elements, boosts, services }
	}

	pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
		Ok(Self {
			elements: ElementRegistry::from_defs(&catalog.elements)?,
			boosts: BoostTable::from_defs(&catalog.boosts)?,
			services: ServiceDirectory::from_defs(&catalog.services),
		})
	}
}
