use clap::Parser;
use dotenv::dotenv;
use scripts::{cli::Cli, errors::ScriptError};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt().init();

    cli.run().await.inspect_err(|e| error!("{}", e))
}
