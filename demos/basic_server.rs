//! Start a kiriminaja-proxy server programmatically.
//!
//! Usage:
//!   `cargo run --example basic_server`

use kiriminaja_proxy::{build_router, AppState, ProxyConfig, SharedLogger};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ProxyConfig::find_and_load(None)?;

    println!("Upstream: {}", config.upstream.base_url);
    println!("Timeout:  {}s", config.upstream.timeout_secs);

    let logger = SharedLogger::new("proxy-demo.log")?;
    let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

    let port = config.port;
    let state = Arc::new(AppState {
        config,
        client,
        logger,
    });

    let app = build_router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Listening on http://{}", addr);
    println!();
    println!("  curl 'http://localhost:{}/api/address?q=bandung'", port);
    println!(
        "  curl -X POST 'http://localhost:{}/api/pricing' \\",
        port
    );
    println!("       -H 'Content-Type: application/json' \\");
    println!("       -d '{{\"from\":\"66268\",\"thru\":\"66225\",\"weight\":1000}}'");

    axum::serve(listener, app).await?;
    Ok(())
}
