use clap::Parser;
use std::net::{Ipv6Addr, SocketAddr};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sms_gateway::config::ConfigLoader;
use sms_gateway::rest_api::{build_router, RestContext};
use sms_gateway::service::SmsService;
use sms_gateway::transport::SerialTransport;

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "HTTP to AT-command SMS gateway for cellular modems.",
    long_about = "Bridges POST /send-sms requests to a cellular modem's AT-command \
interface over a serial port. Configuration comes from a JSON file at a \
well-known location, environment variables, or these flags, in ascending \
order of precedence."
)]
struct Args {
    /// Path to the JSON config file (skips the well-known locations).
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Serial device connected to the modem.
    #[arg(short, long)]
    device: Option<String>,

    /// Port for the HTTP server.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loader = ConfigLoader::load_with_explicit(args.config.as_deref())?;
    let config_path = loader.config_path.clone();
    let mut config = loader.into_config();
    if let Some(device) = args.device {
        config.serial_port = device;
    }
    if let Some(port) = args.port {
        config.http_port = port;
    }

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    match &config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("Config file not found, using defaults"),
    }
    info!("Using serial port: {}", config.serial_port);
    info!("Using HTTP port: {}", config.http_port);

    let transport = SerialTransport::open(&config.serial_port, config.port_settings())?;
    let service = SmsService::with_transport(transport);
    let app = build_router(RestContext { service });

    // Bind the wildcard v6 address; on dual-stack hosts this accepts
    // IPv4 as well.
    let addr = SocketAddr::from((Ipv6Addr::UNSPECIFIED, config.http_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// --- Graceful Shutdown Handler ---
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown...");
}
