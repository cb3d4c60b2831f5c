use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = gleaner_query::Args::parse();
	gleaner_query::run(args).await
}
