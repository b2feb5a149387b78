//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (MongoDB, in-memory test doubles) implement this trait.

use crate::domain::{Parcel, ParcelId, Payment, PaymentStatus};
use crate::dto::StatusUpdate;
use crate::error::RepoError;

/// The main repository port for the two collections, `parcels` and
/// `payments`.
///
/// The only consistency guarantee implementations must provide is the
/// unique index on the parcel tracking id: inserting a parcel whose
/// tracking id already exists fails with `RepoError::Conflict`. There is
/// no transactional coupling between the two collections.
#[async_trait::async_trait]
pub trait BookingRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Parcel Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists a new parcel, enforcing tracking-id uniqueness.
    async fn insert_parcel(&self, parcel: Parcel) -> Result<Parcel, RepoError>;

    /// Lists parcels, newest booking first, optionally filtered by the
    /// caller-supplied `email` field.
    async fn list_parcels(&self, email: Option<&str>) -> Result<Vec<Parcel>, RepoError>;

    /// Finds a parcel by identity.
    async fn find_parcel(&self, id: ParcelId) -> Result<Option<Parcel>, RepoError>;

    /// Sets the payment status of a parcel, reporting how many records
    /// matched and how many were actually modified.
    async fn set_payment_status(
        &self,
        id: ParcelId,
        status: PaymentStatus,
    ) -> Result<StatusUpdate, RepoError>;

    /// Deletes a parcel. Returns `false` when nothing matched.
    async fn delete_parcel(&self, id: ParcelId) -> Result<bool, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists a new payment record.
    async fn insert_payment(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Lists payment records for a user email, newest first.
    async fn list_payments(&self, email: &str) -> Result<Vec<Payment>, RepoError>;
}
