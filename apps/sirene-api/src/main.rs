use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = sirene_api::Args::parse();

	sirene_api::run(args).await
}
