use serde_json::Value;

/// Message of an `error` payload, if the response carries one.
///
/// String payloads are returned verbatim; structured payloads as `"<type>: <reason>"` when both
/// are present, otherwise as their JSON text.
pub fn engine_error(response: &Value) -> Option<String> {
	match response.get("error")? {
		Value::Null => None,
		Value::String(message) => Some(message.clone()),
		Value::Object(payload) => {
			let kind = payload.get("type").and_then(Value::as_str);
			let reason = payload.get("reason").and_then(Value::as_str);

			match (kind, reason) {
				(Some(kind), Some(reason)) => Some(format!("{kind}: {reason}")),
				_ => Some(Value::Object(payload.clone()).to_string()),
			}
		},
		other => Some(other.to_string()),
	}
}

/// Hit count from `hits.total`, which is a bare integer or `{ "value": integer }` depending on
/// the engine generation. Absent totals count as zero.
pub fn total_hits(response: &Value) -> u64 {
	let Some(total) = response.get("hits").and_then(|hits| hits.get("total")) else {
		return 0;
	};

	total.as_u64().or_else(|| total.get("value").and_then(Value::as_u64)).unwrap_or(0)
}

pub fn hits(response: &Value) -> &[Value] {
	response
		.get("hits")
		.and_then(|hits| hits.get("hits"))
		.and_then(Value::as_array)
		.map(Vec::as_slice)
		.unwrap_or(&[])
}

/// Raw buckets of the aggregation keyed by `field`, or `None` when the response has no such
/// aggregation.
pub fn buckets<'a>(response: &'a Value, field: &str) -> Option<&'a [Value]> {
	response
		.get("aggregations")?
		.get(field)?
		.get("buckets")?
		.as_array()
		.map(Vec::as_slice)
}
