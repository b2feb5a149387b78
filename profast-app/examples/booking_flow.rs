//! Client example demonstrating the full booking and payment flow against a
//! running server.
//!
//! Start the server first, then: cargo run -p profast-app --example booking_flow
//!
//! The target server is taken from BASE_URL (default http://localhost:3000).

use profast_client::BookingClient;
use profast_types::{PaymentStatus, RecordPaymentRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = BookingClient::new(&base_url);

    // Health check
    let health = client.health().await?;
    println!("Server health: {health}");

    // Book a parcel
    let details = serde_json::json!({
        "sender": "Alice",
        "receiver": "Bob",
        "email": "alice@example.com",
        "weight": 2.5,
        "address": "42 Main St"
    });
    let details = details.as_object().cloned().unwrap();
    let parcel = client.book_parcel(&details).await?;
    println!(
        "Booked parcel {} with tracking id {}",
        parcel.id, parcel.tracking_id
    );

    // Fetch it back
    let fetched = client.get_parcel(parcel.id).await?;
    println!(
        "Fetched parcel: paymentStatus={}, parcelStatus={}",
        fetched.payment_status, fetched.parcel_status
    );

    // Create a payment intent for the booking
    let intent = client.create_payment_intent(49.99).await?;
    println!("Payment intent created, client secret: {}", intent.client_secret);

    // Record the completed payment and mark the parcel paid
    let payment = client
        .record_payment(&RecordPaymentRequest {
            tracking_id: Some(parcel.tracking_id.to_string()),
            user_email: Some("alice@example.com".to_string()),
            amount: Some(49.99),
            transaction_id: Some("pi_demo_123".to_string()),
            status: Some("succeeded".to_string()),
        })
        .await?;
    println!("Payment recorded at {}", payment.created_at);

    let update = client
        .update_payment_status(parcel.id, PaymentStatus::Paid)
        .await?;
    println!("Parcel marked paid (modified {})", update.modified_count);

    // List this user's parcels and payments
    let parcels = client.list_parcels(Some("alice@example.com")).await?;
    println!("User has {} parcel(s)", parcels.len());

    let history = client.payment_history("alice@example.com").await?;
    println!("User has {} payment(s)", history.len());

    Ok(())
}
