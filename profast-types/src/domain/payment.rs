//! Payment record domain model.

use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unique identifier for a Payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentId(ObjectId);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Creates a PaymentId from an existing ObjectId.
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Returns the underlying ObjectId.
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for PaymentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for PaymentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse_str(&s)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// A completed-payment record.
///
/// Payments are immutable once recorded - they are a historical log, never
/// updated or deleted by this system. The `tracking_id` references a parcel
/// by value only; no foreign-key integrity is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Store-assigned identity
    #[serde(rename = "_id")]
    pub id: PaymentId,
    /// Tracking id of the parcel this payment was for
    #[serde(rename = "trackingId")]
    pub tracking_id: String,
    /// Email of the paying user
    #[serde(rename = "userEmail")]
    pub user_email: String,
    /// Amount paid, in major currency units
    pub amount: f64,
    /// The external gateway's transaction identifier
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Caller-supplied status string
    pub status: String,
    /// RFC 3339 creation timestamp, immutable
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Payment {
    /// Creates a new payment record with `created_at` set to now.
    pub fn new(
        tracking_id: String,
        user_email: String,
        amount: f64,
        transaction_id: String,
        status: String,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            tracking_id,
            user_email,
            amount,
            transaction_id,
            status,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
