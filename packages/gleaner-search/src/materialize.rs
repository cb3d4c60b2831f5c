use serde::Serialize;
use serde_json::Value;

use crate::response;
use gleaner_domain::{ElementRegistry, Item};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedHit {
	/// Zero-based position of the hit in the response page.
	pub position: usize,
	pub message: String,
}

/// Decoded page: every well-formed item plus every hit that failed to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
	pub items: Vec<Item>,
	pub rejected: Vec<RejectedHit>,
}

pub fn materialize(response: &Value, elements: &ElementRegistry) -> Page {
	let mut page = Page::default();

	for (position, hit) in response::hits(response).iter().enumerate() {
		let Some(source) = hit.get("_source").and_then(Value::as_object) else {
			page.rejected
				.push(RejectedHit { position, message: format!("hit {position} has no _source.") });

			continue;
		};

		match Item::from_source(source, elements) {
			Ok(item) => page.items.push(item),
			Err(err) => page.rejected.push(RejectedHit { position, message: err.to_string() }),
		}
	}

	page
}
