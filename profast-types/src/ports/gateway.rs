//! Payment gateway port.
//!
//! This trait defines the interface for the third-party payment processor.
//! Implementations can be HTTP clients, mock gateways, etc.

/// Error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Request(String),

    #[error("Gateway rejected the request: {0}")]
    Rejected(String),
}

/// A gateway-side object representing an in-progress charge.
///
/// The `client_secret` is handed back to the browser client, which uses it
/// to complete the payment directly with the gateway.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Gateway-issued intent identifier
    pub id: String,
    /// Secret used by the client to confirm the charge
    pub client_secret: String,
}

/// Port trait for payment gateways.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Creates a payment intent for the given amount in minor currency
    /// units (cents). The currency is fixed and the payment method is
    /// card-only; both are adapter concerns.
    async fn create_payment_intent(&self, amount_minor: i64)
    -> Result<PaymentIntent, GatewayError>;
}
