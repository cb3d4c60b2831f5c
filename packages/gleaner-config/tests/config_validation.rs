use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use gleaner_config::{Catalog, Config};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_file(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("gleaner_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

fn load_err(payload: String) -> String {
	let path = write_temp_file(payload);
	let result = gleaner_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result.expect_err("Expected config validation error.").to_string()
}

#[test]
fn dialect_must_be_known() {
	let message = load_err(sample_toml_with("engine", "dialect", Value::String("v2".to_string())));

	assert!(
		message.contains("engine.dialect must be one of modern or legacy."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn dialect_defaults_to_modern() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("template");

	root.get_mut("engine").and_then(Value::as_table_mut).expect("engine").remove("dialect");

	let cfg: Config = toml::from_str(&toml::to_string(&root).expect("render")).expect("parse");

	assert_eq!(cfg.engine.dialect, "modern");
}

#[test]
fn index_must_be_non_empty() {
	let message = load_err(sample_toml_with("engine", "index", Value::String("  ".to_string())));

	assert!(message.contains("engine.index must be non-empty."), "Unexpected error: {message}");
}

#[test]
fn timeout_must_be_positive() {
	let message = load_err(sample_toml_with("engine", "timeout_ms", Value::Integer(0)));

	assert!(
		message.contains("engine.timeout_ms must be greater than zero."),
		"Unexpected error: {message}"
	);
}

#[test]
fn bucket_limit_must_be_positive() {
	let mut cfg = base_config();

	cfg.search.bucket_limit = 0;

	let err = gleaner_config::validate(&cfg).expect_err("Expected bucket limit error.");

	assert!(
		err.to_string().contains("search.bucket_limit must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn alphanumeric_bucket_limit_cannot_undercut_bucket_limit() {
	let mut cfg = base_config();

	cfg.search.bucket_limit = 50;
	cfg.search.alphanumeric_bucket_limit = 20;

	let err = gleaner_config::validate(&cfg).expect_err("Expected bucket limit ordering error.");

	assert!(
		err.to_string().contains("search.alphanumeric_bucket_limit must not be below"),
		"Unexpected error: {err}"
	);
}

#[test]
fn search_section_is_optional() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("template");

	root.as_table_mut().expect("table").remove("search");

	let path = write_temp_file(toml::to_string(&root).expect("render"));
	let result = gleaner_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected config without [search] to load.");

	assert_eq!(cfg.search.bucket_limit, 10);
	assert_eq!(cfg.search.alphanumeric_bucket_limit, 1_000);
}

#[test]
fn blank_api_key_is_normalized_away() {
	let path = write_temp_file(sample_toml_with(
		"engine",
		"url",
		Value::String("http://127.0.0.1:9200/".to_string()),
	));
	let result = gleaner_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected sample config to load.");

	assert!(cfg.engine.api_key.is_none());
	assert_eq!(cfg.engine.url, "http://127.0.0.1:9200");
}

#[test]
fn default_headers_must_be_strings() {
	let mut cfg = base_config();

	cfg.engine.default_headers.insert("x-trace".to_string(), serde_json::json!(7));

	let err = gleaner_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(
		err.to_string().contains("engine.default_headers.x-trace must be a string."),
		"Unexpected error: {err}"
	);
}

#[test]
fn catalog_rejects_duplicate_element_names() {
	let catalog: Catalog = toml::from_str(
		r#"
[[elements]]
name = "title"

[[elements]]
name = "title"
"#,
	)
	.expect("Failed to parse catalog.");
	let err = gleaner_config::validate_catalog(&catalog).expect_err("Expected duplicate error.");

	assert!(err.to_string().contains("'title' is defined more than once"), "Unexpected: {err}");
}

#[test]
fn catalog_element_defaults_apply() {
	let catalog: Catalog = toml::from_str(
		r#"
[[elements]]
name = "title"
"#,
	)
	.expect("Failed to parse catalog.");
	let element = &catalog.elements[0];

	assert_eq!(element.data_type, "string");
	assert_eq!(element.source, "local");
	assert_eq!(element.facet_order, "count");
	assert!(!element.facetable);
}

#[test]
fn gleaner_example_toml_is_valid() {
	let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

	path.push("../../gleaner.example.toml");

	gleaner_config::load(&path).expect("Expected gleaner.example.toml to be a valid config.");
}

#[test]
fn catalog_example_toml_is_valid() {
	let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

	path.push("../../catalog.example.toml");

	let catalog = gleaner_config::load_catalog(&path)
		.expect("Expected catalog.example.toml to be a valid catalog.");

	assert!(!catalog.elements.is_empty());
	assert_eq!(catalog.services.len(), 1);
}
