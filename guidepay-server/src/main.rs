//! Guidepay Server
//!
//! Checkout backend for a single digital product: opens gateway orders,
//! verifies completed payments, records them in a spreadsheet and emails
//! the buyer their guide.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use guidepay_core::gateway::{OrderService, RazorpayGateway};
use guidepay_core::ledger::GoogleSheetsLedger;
use guidepay_core::notifier::{MessageTemplate, build_notifier};
use guidepay_core::pipeline::VerificationPipeline;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Guidepay - payment verification and delivery backend
#[derive(Parser, Debug)]
#[command(name = "guidepay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "GUIDEPAY_CONFIG", default_value = "./guidepay.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Override the listen port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_json);

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    tracing::info!("Starting guidepay-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen, args.port);
    let config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    // Build the external capabilities
    let gateway = Arc::new(RazorpayGateway::new(&config.gateway));
    let ledger = Arc::new(GoogleSheetsLedger::new(&config.ledger).map_err(|e| {
        tracing::error!("Failed to initialize ledger: {}", e);
        e
    })?);
    let notifier = build_notifier(&config.mail).map_err(|e| {
        tracing::error!("Failed to initialize mail transport: {}", e);
        e
    })?;

    // Create application state
    let pipeline = VerificationPipeline::new(
        config.gateway.secret_bytes(),
        ledger,
        notifier,
        MessageTemplate::from_config(&config.mail),
    );
    let orders = OrderService::new(gateway, &config.product);
    let state = AppState::new(pipeline, orders, config.server.expose_error_details);

    // Build the router
    let router = build_router(state, &config.server.allowed_origins);

    // Run the server
    tracing::info!("Starting HTTP server on {}", config.server.listen);
    let result = run_server(router, config.server.listen).await;

    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
