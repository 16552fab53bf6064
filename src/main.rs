use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erratic::config;
use erratic::http::HttpServer;
use erratic::lifecycle::{signals, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erratic=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("erratic v0.1.0 starting");

    // Load configuration from the environment (PORT)
    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_root = %config.static_files.root.display(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        endpoint = %format!("http://{local_addr}/proxy?url="),
        "erratic is listening"
    );

    // Trigger graceful shutdown on SIGINT / SIGTERM
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
