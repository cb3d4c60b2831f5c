use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
	/// Raw aggregation key.
	pub name: String,
	pub label: String,
	pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
	/// Element label.
	pub name: String,
	/// Index field the facet aggregates.
	pub field: String,
	pub buckets: Vec<Bucket>,
}
