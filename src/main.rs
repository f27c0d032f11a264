use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = memecoin_risk::Args::parse();
    memecoin_risk::app_init().await?;
    memecoin_risk::run(args).await
}
