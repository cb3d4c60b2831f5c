//! Index field names shared by every stored document.

pub const INDEX_ID: &str = "index_id";
pub const SOURCE_URI: &str = "source_uri";
pub const SERVICE_KEY: &str = "service_key";
pub const VARIANT: &str = "variant";
pub const PARENT_ID: &str = "parent_id";
pub const ELEMENTS: &str = "elements";
/// Synthetic copy-to field holding the text of every searchable element.
pub const SEARCH_ALL: &str = "search_all";
pub const SCORE: &str = "_score";

pub const LOCAL_PREFIX: &str = "local_";
pub const DATE_PREFIX: &str = "date_";
pub const SOURCE_PREFIX: &str = "source_";
pub const KEYWORD_SUFFIX: &str = ".keyword";
pub const SORT_SUFFIX: &str = ".sort";
