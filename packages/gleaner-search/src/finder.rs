use serde::Serialize;
use serde_json::Value;

use crate::{
	Error, Result, SearchService, facets,
	materialize::{self, Page},
	request::SearchRequest,
	response, settings,
};
use gleaner_domain::{Facet, Item};

/// Everything decoded from one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
	pub count: u64,
	pub facets: Vec<Facet>,
	pub page: Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
	Unexecuted,
	Executing,
	Executed,
	Failed,
}

#[derive(Debug)]
enum Execution {
	Unexecuted,
	/// Left behind only when a caller drops the accessor future mid-request; the next access
	/// runs the request again.
	Executing,
	Executed(Decoded),
	Failed(Error),
}

/// Lazily executes one [`SearchRequest`].
///
/// The first call to [`Finder::count`], [`Finder::facets`] or [`Finder::to_a`] runs the query;
/// every later call reads the stored outcome, success or failure.
pub struct Finder<'a> {
	service: &'a SearchService,
	request: SearchRequest,
	state: Execution,
}
impl<'a> Finder<'a> {
	pub(crate) fn new(service: &'a SearchService, request: SearchRequest) -> Self {
		Self { service, request, state: Execution::Unexecuted }
	}

	pub fn request(&self) -> &SearchRequest {
		&self.request
	}

	/// Hands the request back so a caller can derive a new one.
	pub fn into_request(self) -> SearchRequest {
		self.request
	}

	pub fn state(&self) -> ExecutionState {
		match self.state {
			Execution::Unexecuted => ExecutionState::Unexecuted,
			Execution::Executing => ExecutionState::Executing,
			Execution::Executed(_) => ExecutionState::Executed,
			Execution::Failed(_) => ExecutionState::Failed,
		}
	}

	/// Query document this finder sends, built without executing it.
	pub fn query_document(&self) -> Value {
		self.service.query_builder().build(&self.request)
	}

	pub async fn count(&mut self) -> Result<u64> {
		Ok(self.decoded().await?.count)
	}

	pub async fn facets(&mut self) -> Result<Vec<Facet>> {
		Ok(self.decoded().await?.facets.clone())
	}

	/// Items of the page. Fails with the first document that could not be decoded.
	pub async fn to_a(&mut self) -> Result<Vec<Item>> {
		let decoded = self.decoded().await?;

		if let Some(rejected) = decoded.page.rejected.first() {
			return Err(Error::InvalidDocument { message: rejected.message.clone() });
		}

		Ok(decoded.page.items.clone())
	}

	/// Full decoded response, including hits that failed to decode.
	pub async fn decoded(&mut self) -> Result<&Decoded> {
		if matches!(self.state, Execution::Unexecuted | Execution::Executing) {
			self.state = Execution::Executing;
			self.state = match self.execute().await {
				Ok(decoded) => Execution::Executed(decoded),
				Err(err) => Execution::Failed(err),
			};
		}

		match &self.state {
			Execution::Executed(decoded) => Ok(decoded),
			Execution::Failed(err) => Err(err.clone()),
			Execution::Unexecuted | Execution::Executing => Err(Error::Transport {
				message: "Search execution did not complete.".to_string(),
			}),
		}
	}

	async fn execute(&self) -> Result<Decoded> {
		let catalog = &self.service.catalog;
		let body = self.query_document();

		tracing::debug!(
			dialect = settings::dialect_label(self.service.settings.dialect),
			"Executing search request."
		);

		let raw = self.service.transport.search(&body).await?;

		if let Some(message) = response::engine_error(&raw) {
			return Err(Error::Engine { message });
		}

		let count = response::total_hits(&raw);
		let facets = if self.request.aggregations {
			facets::assemble(&raw, &catalog.elements, &catalog.services)
		} else {
			Vec::new()
		};
		let page = if self.request.limit == Some(0) {
			Page::default()
		} else {
			materialize::materialize(&raw, &catalog.elements)
		};

		tracing::debug!(
			count,
			facets = facets.len(),
			items = page.items.len(),
			rejected = page.rejected.len(),
			"Decoded search response."
		);

		Ok(Decoded { count, facets, page })
	}
}
