//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PaymentStatus;

// ─────────────────────────────────────────────────────────────────────────────
// Response Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// The JSON envelope every route responds with:
/// `{success, message?, data?, error?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable outcome description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Underlying error description on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Builds a success envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Builds a failure envelope.
    pub fn fail(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parcel DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to update a parcel's payment status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    /// New payment status; required, but optional in the wire format so a
    /// missing field surfaces as a bad request instead of a decode error
    #[serde(rename = "paymentStatus", skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

/// Matched/modified counts reported by a status update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdate {
    /// How many records the identity matched
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    /// How many records were actually changed
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

/// Confirmation of a deletion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DeleteReport {
    /// How many records were removed
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment intent with the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    /// Amount in major currency units (e.g. dollars)
    #[schema(example = 49.99)]
    pub amount: Option<f64>,
}

/// Response carrying the gateway-issued client secret.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponse {
    /// Secret the browser client uses to complete the charge
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Request to record a completed payment.
///
/// All fields are optional in the wire format; the service enforces
/// presence of `trackingId`, `userEmail` and `transactionId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    /// Tracking id of the parcel paid for
    #[serde(rename = "trackingId", skip_serializing_if = "Option::is_none")]
    #[schema(example = "TRK-8F2K1Q")]
    pub tracking_id: Option<String>,
    /// Email of the paying user
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    #[schema(example = "user@example.com")]
    pub user_email: Option<String>,
    /// Amount paid, in major currency units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// The gateway's transaction identifier
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none")]
    #[schema(example = "pi_3Nv0XYZ")]
    pub transaction_id: Option<String>,
    /// Caller-supplied status string
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "succeeded")]
    pub status: Option<String>,
}
