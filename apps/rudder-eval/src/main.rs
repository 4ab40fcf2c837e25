// crates.io
use clap::Parser;
// self
use rudder_eval::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	rudder_eval::run(args).await
}
