//! Profast CLI
//!
//! Command-line interface for the parcel booking API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use profast_client::BookingClient;
use profast_types::{ParcelId, PaymentStatus, RecordPaymentRequest};

#[derive(Parser)]
#[command(name = "profast")]
#[command(author, version, about = "Parcel booking API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the booking API
    #[arg(long, env = "PROFAST_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parcel operations
    Parcel {
        #[command(subcommand)]
        action: ParcelCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum ParcelCommands {
    /// Book a new parcel from a JSON object of booking fields
    Book {
        /// Booking fields as a JSON object, e.g. '{"sender":"A","email":"a@b.com"}'
        details: String,
    },
    /// Get parcel details
    Get {
        /// Parcel ID (24-character hex)
        id: String,
    },
    /// List parcels
    List {
        /// Only parcels booked with this email
        #[arg(long)]
        email: Option<String>,
    },
    /// Mark a parcel's payment status
    SetPaymentStatus {
        /// Parcel ID (24-character hex)
        id: String,
        /// New status (unpaid or paid)
        #[arg(long)]
        status: String,
    },
    /// Delete a parcel
    Delete {
        /// Parcel ID (24-character hex)
        id: String,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create a payment intent
    Intent {
        /// Amount in major currency units
        #[arg(long)]
        amount: f64,
    },
    /// Record a completed payment
    Record {
        #[arg(long)]
        tracking_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        transaction_id: String,
        #[arg(long, default_value = "succeeded")]
        status: String,
    },
    /// List a user's payment history
    History {
        /// Email of the paying user
        #[arg(long)]
        email: String,
    },
}

fn parse_parcel_id(s: &str) -> Result<ParcelId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid parcel ID: {}", s))
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BookingClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Parcel { action } => match action {
            ParcelCommands::Book { details } => {
                let details: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(&details)
                        .map_err(|e| anyhow::anyhow!("details must be a JSON object: {e}"))?;
                let parcel = client.book_parcel(&details).await?;
                println!("{}", serde_json::to_string_pretty(&parcel)?);
            }
            ParcelCommands::Get { id } => {
                let parcel = client.get_parcel(parse_parcel_id(&id)?).await?;
                println!("{}", serde_json::to_string_pretty(&parcel)?);
            }
            ParcelCommands::List { email } => {
                let parcels = client.list_parcels(email.as_deref()).await?;
                println!("{}", serde_json::to_string_pretty(&parcels)?);
            }
            ParcelCommands::SetPaymentStatus { id, status } => {
                let update = client
                    .update_payment_status(parse_parcel_id(&id)?, parse_payment_status(&status)?)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&update)?);
            }
            ParcelCommands::Delete { id } => {
                let report = client.delete_parcel(parse_parcel_id(&id)?).await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Intent { amount } => {
                let intent = client.create_payment_intent(amount).await?;
                println!("{}", serde_json::to_string_pretty(&intent)?);
            }
            PaymentCommands::Record {
                tracking_id,
                email,
                amount,
                transaction_id,
                status,
            } => {
                let payment = client
                    .record_payment(&RecordPaymentRequest {
                        tracking_id: Some(tracking_id),
                        user_email: Some(email),
                        amount: Some(amount),
                        transaction_id: Some(transaction_id),
                        status: Some(status),
                    })
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::History { email } => {
                let history = client.payment_history(&email).await?;
                println!("{}", serde_json::to_string_pretty(&history)?);
            }
        },
    }

    Ok(())
}
