//! Meguru - Incremental Knowledge Map

use clap::Parser;

use meguru::cli::App;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    // Initialize logging
    let filter = if app.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    app.run().await
}
