pub mod facets;
pub mod filter;
pub mod finder;
pub mod materialize;
pub mod query;
pub mod request;
pub mod response;
pub mod settings;

mod error;

pub use error::{Error, Result};
pub use filter::{FilterInput, FilterMap, FilterValue};
pub use finder::{Decoded, ExecutionState, Finder};
pub use materialize::{Page, RejectedHit};
pub use query::QueryBuilder;
pub use request::{SearchRequest, SortDirection, SortOrder, TextQuery};
pub use settings::{Dialect, SearchSettings};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use gleaner_config::Config;
use gleaner_domain::CatalogSnapshot;
use gleaner_transport::EngineClient;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes a query document against the search engine and returns the raw response.
pub trait SearchTransport
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, color_eyre::Result<Value>>;
}

struct DefaultTransport {
	client: EngineClient,
}
impl SearchTransport for DefaultTransport {
	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, color_eyre::Result<Value>> {
		Box::pin(async move { Ok(self.client.search(body).await?) })
	}
}

/// Entry point for searches: resolved settings, a catalog snapshot and a transport.
pub struct SearchService {
	pub settings: SearchSettings,
	pub catalog: Arc<CatalogSnapshot>,
	pub transport: Arc<dyn SearchTransport>,
}
impl SearchService {
	/// Builds a service that talks to the engine configured in `cfg`.
	pub fn new(cfg: &Config, catalog: CatalogSnapshot) -> Result<Self> {
		let client = EngineClient::new(&cfg.engine)
			.map_err(|err| Error::Transport { message: err.to_string() })?;

		Ok(Self::with_transport(
			SearchSettings::from_config(cfg),
			Arc::new(catalog),
			Arc::new(DefaultTransport { client }),
		))
	}

	pub fn with_transport(
		settings: SearchSettings,
		catalog: Arc<CatalogSnapshot>,
		transport: Arc<dyn SearchTransport>,
	) -> Self {
		Self { settings, catalog, transport }
	}

	pub fn query_builder(&self) -> QueryBuilder<'_> {
		QueryBuilder::new(&self.settings, &self.catalog.elements, &self.catalog.boosts)
	}

	pub fn finder(&self, request: SearchRequest) -> Finder<'_> {
		Finder::new(self, request)
	}
}
