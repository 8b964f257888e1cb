use clap::Parser;
use kiriminaja_proxy::{build_router, AppState, ProxyConfig, SharedLogger};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "kiriminaja-proxy",
    about = "Server-side proxy for the KiriminAja logistics API",
    version
)]
struct Cli {
    /// Path to config file (TOML); defaults apply when none is found
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Request log file path
    #[arg(long, default_value = "kiriminaja-proxy.log")]
    log_file: PathBuf,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiriminaja_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        println!("  1. kiriminaja-proxy.toml (current directory)");
        if cfg!(target_os = "macos") {
            println!("  2. ~/Library/Application Support/kiriminaja-proxy/config.toml");
        } else {
            println!("  2. $XDG_CONFIG_HOME/kiriminaja-proxy/config.toml");
            println!("     ~/.config/kiriminaja-proxy/config.toml");
        }
        println!("  3. ~/.kiriminaja-proxy.toml");
        return Ok(());
    }

    let mut config = ProxyConfig::find_and_load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let logger = SharedLogger::new(&cli.log_file)?;

    info!("kiriminaja-proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("  Upstream:  {}", config.upstream.base_url);
    info!("  Timeout:   {}s", config.upstream.timeout_secs);
    info!("  Port:      {}", config.port);
    info!("  Log file:  {}", cli.log_file.display());

    logger.info(
        "startup",
        format!(
            "Starting kiriminaja-proxy upstream={} port={}",
            config.upstream.base_url, config.port
        ),
    );

    let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

    let state = Arc::new(AppState {
        config: config.clone(),
        client,
        logger,
    });

    let app = build_router(state);
    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
