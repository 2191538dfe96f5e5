use anyhow::Result;
use clap::Parser;
use promptdesk::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    promptdesk::run(args).await
}
