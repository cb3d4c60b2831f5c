pub mod fixtures;

use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use color_eyre::eyre;
use serde_json::Value;

use gleaner_search::{BoxFuture, SearchTransport};

/// Transport stub that answers every request with one canned response and records what it saw.
#[derive(Clone)]
pub struct CountingTransport {
	response: Value,
	calls: Arc<AtomicUsize>,
	requests: Arc<Mutex<Vec<Value>>>,
}
impl CountingTransport {
	pub fn new(response: Value) -> Self {
		Self {
			response,
			calls: Arc::new(AtomicUsize::new(0)),
			requests: Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn requests(&self) -> Vec<Value> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_request(&self) -> Option<Value> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).last().cloned()
	}
}
impl SearchTransport for CountingTransport {
	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, color_eyre::Result<Value>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(body.clone());

		let response = self.response.clone();

		Box::pin(async move { Ok(response) })
	}
}

/// Transport stub whose every request fails as if the engine were unreachable.
#[derive(Clone)]
pub struct FailingTransport {
	message: String,
	calls: Arc<AtomicUsize>,
}
impl FailingTransport {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into(), calls: Arc::new(AtomicUsize::new(0)) }
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl SearchTransport for FailingTransport {
	fn search<'a>(&'a self, _body: &'a Value) -> BoxFuture<'a, color_eyre::Result<Value>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let message = self.message.clone();

		Box::pin(async move { Err(eyre::eyre!(message)) })
	}
}
