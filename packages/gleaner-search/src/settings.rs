use gleaner_config::Config;

/// Search-engine generation the query document and response are shaped for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
	#[default]
	Modern,
	Legacy,
}
impl Dialect {
	/// Legacy engines expect `from` on every request, even when it is zero.
	pub fn always_emits_from(self) -> bool {
		matches!(self, Self::Legacy)
	}

	/// Bucket sort key for alphanumeric facets.
	pub fn key_order(self) -> &'static str {
		match self {
			Self::Modern => "_key",
			Self::Legacy => "_term",
		}
	}
}

/// Resolved configuration handed to the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
	pub dialect: Dialect,
	pub bucket_limit: u32,
	pub alphanumeric_bucket_limit: u32,
}
impl SearchSettings {
	pub fn from_config(cfg: &Config) -> Self {
		Self {
			dialect: resolve_dialect(cfg),
			bucket_limit: cfg.search.bucket_limit,
			alphanumeric_bucket_limit: cfg.search.alphanumeric_bucket_limit,
		}
	}
}
impl Default for SearchSettings {
	fn default() -> Self {
		Self { dialect: Dialect::Modern, bucket_limit: 10, alphanumeric_bucket_limit: 1_000 }
	}
}

pub fn resolve_dialect(cfg: &Config) -> Dialect {
	match cfg.engine.dialect.as_str() {
		"legacy" => Dialect::Legacy,
		_ => Dialect::Modern,
	}
}

pub fn dialect_label(dialect: Dialect) -> &'static str {
	match dialect {
		Dialect::Modern => "modern",
		Dialect::Legacy => "legacy",
	}
}
