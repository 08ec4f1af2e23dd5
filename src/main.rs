use clap::Parser;
use rios_online::cli::{run, Cli};
use rios_online::error::Result;
use rios_online::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;
    run(cli).await
}
