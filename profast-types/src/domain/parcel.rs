//! Parcel domain model.

use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unique identifier for a Parcel (the store-assigned identity).
///
/// Serialized as the 24-character hex string so API responses and path
/// parameters stay plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParcelId(ObjectId);

impl ParcelId {
    /// Creates a new random ParcelId.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Creates a ParcelId from an existing ObjectId.
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Returns the underlying ObjectId.
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for ParcelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl std::str::FromStr for ParcelId {
    type Err = bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ObjectId::parse_str(s)?))
    }
}

impl Serialize for ParcelId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ParcelId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse_str(&s)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Alphabet for tracking codes: uppercase base-36.
const TRACKING_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random part of a tracking code.
const TRACKING_CODE_LEN: usize = 6;

/// A short random human-readable code uniquely identifying a parcel,
/// in the form `TRK-` followed by six uppercase base-36 characters.
///
/// Uniqueness is enforced by the store's unique index, not by the
/// generator; callers regenerate on a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// Generates a new random tracking id.
    pub fn generate() -> Self {
        use rand::Rng;

        let mut rng = rand::rng();
        let code: String = (0..TRACKING_CODE_LEN)
            .map(|_| TRACKING_ALPHABET[rng.random_range(0..TRACKING_ALPHABET.len())] as char)
            .collect();
        Self(format!("TRK-{code}"))
    }

    /// Wraps an existing tracking id string (for store reconstruction).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Returns the tracking id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment state of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Delivery state of a parcel.
///
/// Only `pending` is ever assigned by this system; the value is kept as an
/// open string so records written with other states round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelStatus(String);

impl ParcelStatus {
    /// The status every new booking starts in.
    pub fn pending() -> Self {
        Self("pending".to_string())
    }

    /// Wraps an existing status string (for store reconstruction).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Returns the status as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ParcelStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shipment booking record.
///
/// The typed fields are owned by the service; everything the caller supplied
/// at booking time (sender, receiver, address, weight, ...) is carried
/// opaquely in `details` and flattened into the JSON representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parcel {
    /// Store-assigned identity
    #[serde(rename = "_id")]
    pub id: ParcelId,
    /// Unique human-readable tracking code
    #[serde(rename = "trackingId")]
    pub tracking_id: TrackingId,
    /// RFC 3339 creation timestamp, immutable
    #[serde(rename = "createdDate")]
    pub created_date: String,
    /// Whether the booking has been paid for
    #[serde(rename = "paymentStatus")]
    pub payment_status: PaymentStatus,
    /// Delivery state, `pending` at creation
    #[serde(rename = "parcelStatus")]
    pub parcel_status: ParcelStatus,
    /// Caller-supplied fields, passed through unvalidated
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Keys owned by the service. A caller-supplied value under any of these
/// must not survive into `details`, or the flattened JSON representation
/// would carry the key twice with the forged value last.
const RESERVED_KEYS: [&str; 5] = [
    "_id",
    "trackingId",
    "createdDate",
    "paymentStatus",
    "parcelStatus",
];

impl Parcel {
    /// Creates a new booking from caller-supplied fields.
    ///
    /// Assigns identity, a fresh tracking id, the creation timestamp and the
    /// default statuses. Caller-supplied values under service-owned keys are
    /// discarded.
    pub fn new(mut details: serde_json::Map<String, serde_json::Value>) -> Self {
        for key in RESERVED_KEYS {
            details.remove(key);
        }
        Self {
            id: ParcelId::new(),
            tracking_id: TrackingId::generate(),
            created_date: Utc::now().to_rfc3339(),
            payment_status: PaymentStatus::Unpaid,
            parcel_status: ParcelStatus::pending(),
            details,
        }
    }

    /// Replaces the tracking id with a freshly generated one.
    ///
    /// Used when an insert hits the unique-index conflict.
    pub fn regenerate_tracking_id(&mut self) {
        self.tracking_id = TrackingId::generate();
    }

    /// Returns the caller-supplied `email` field, if present.
    pub fn email(&self) -> Option<&str> {
        self.details.get("email").and_then(|v| v.as_str())
    }
}
