//! # Profast Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Connect the MongoDB repository adapter
//! - Connect the Stripe payment gateway adapter
//! - Create the booking service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profast_hex::{BookingService, HttpServer};
use profast_repo::build_repo;
use stripe_gateway::StripeGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,profast_app=debug,profast_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting profast server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_name);

    // Build repository (connects, pings and ensures indexes)
    let repo = build_repo(&config.mongodb_uri, &config.database_name).await?;

    // Payment gateway adapter
    let gateway = StripeGateway::new(config.stripe_secret_key);

    // Create the booking service
    let service = BookingService::new(repo, gateway);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
