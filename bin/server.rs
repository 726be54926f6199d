// Financial Chat - Web Server
// POST /chat answers questions from the dataset loaded at startup

use anyhow::{Context, Result};
use clap::Parser;
use fin_chat::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    fin_chat::config::init_tracing();
    let config = ServerConfig::parse();

    // Dataset is a startup dependency: no data, no server
    let resolver = config.data.build_resolver()?;
    tracing::info!(
        matching = ?resolver.matching(),
        companies = ?resolver.table().companies(),
        "Resolver ready"
    );

    let app = router(AppState::new(resolver));

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", config.addr))?;

    tracing::info!(addr = %config.addr, "Server running");
    println!("\n🚀 Server running on http://{}", config.addr);
    println!("   Chat: POST http://{}/chat", config.addr);
    println!("   UI:   http://{}", config.addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
