use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gleaner_domain::{CatalogSnapshot, Facet, Item};
use gleaner_search::{FilterInput, SearchRequest, SearchService, SortOrder};

#[derive(Debug, Parser)]
#[command(
	version = gleaner_cli::VERSION,
	rename_all = "kebab",
	styles = gleaner_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, value_name = "FILE")]
	pub catalog: PathBuf,
	/// Free-text query across every searchable element.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
	/// Required `field:value` pair; repeat a field to match any of its values.
	#[arg(long, value_name = "FIELD:VALUE")]
	pub filter: Vec<String>,
	#[arg(long, value_name = "FIELD:VALUE")]
	pub exclude: Vec<String>,
	/// Content service key to scope the search to.
	#[arg(long, value_name = "KEY")]
	pub service: Option<String>,
	#[arg(long, value_name = "VARIANT")]
	pub include_variant: Vec<String>,
	#[arg(long, value_name = "VARIANT")]
	pub exclude_variant: Vec<String>,
	/// Include documents that have a parent.
	#[arg(long)]
	pub children: bool,
	/// `element[:asc|desc]` or `field[:asc|desc]`.
	#[arg(long, value_name = "FIELD:DIR")]
	pub sort: Vec<String>,
	#[arg(long, default_value_t = 0)]
	pub start: u64,
	#[arg(long)]
	pub limit: Option<u64>,
	#[arg(long)]
	pub no_facets: bool,
	/// Print the query document instead of executing it.
	#[arg(long)]
	pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
	pub count: u64,
	pub facets: Vec<Facet>,
	pub items: Vec<Item>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = gleaner_config::load(&args.config)?;
	init_tracing(&config)?;
	let catalog = CatalogSnapshot::from_catalog(&gleaner_config::load_catalog(&args.catalog)?)?;
	let request = build_request(&args, &catalog)?;
	let service = SearchService::new(&config, catalog)?;
	let mut finder = service.finder(request);

	if args.dry_run {
		println!("{}", serde_json::to_string_pretty(&finder.query_document())?);

		return Ok(());
	}

	tracing::info!(index = %config.engine.index, "Running search.");

	let report = Report {
		count: finder.count().await?,
		facets: finder.facets().await?,
		items: finder.to_a().await?,
	};

	println!("{}", serde_json::to_string_pretty(&report)?);

	Ok(())
}

/// Translates command-line arguments into a search request.
pub fn build_request(args: &Args, catalog: &CatalogSnapshot) -> color_eyre::Result<SearchRequest> {
	let mut request = SearchRequest::new()
		.filters(FilterInput::List(args.filter.clone()))
		.excludes(FilterInput::List(args.exclude.clone()))
		.include_variants(args.include_variant.iter().cloned())
		.exclude_variants(args.exclude_variant.iter().cloned())
		.include_children(args.children)
		.start(args.start)
		.aggregations(!args.no_facets);

	if let Some(query) = &args.query {
		request = request.query(query.as_str());
	}
	if let Some(service) = &args.service {
		request = request.content_service(service.as_str());
	}
	if let Some(limit) = args.limit {
		request = request.limit(limit);
	}
	if !args.sort.is_empty() {
		let mut orders = Vec::with_capacity(args.sort.len());

		for raw in &args.sort {
			let order = SortOrder::parse(raw)
				.ok_or_else(|| eyre::eyre!("Sort order '{raw}' must name a field."))?;
			let order = match catalog.elements.find(&order.field) {
				Some(element) if element.sortable =>
					SortOrder::by_element(element, order.direction),
				_ => order,
			};

			orders.push(order);
		}

		request = request.order(orders);
	}

	Ok(request)
}

fn init_tracing(config: &gleaner_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	Ok(())
}
