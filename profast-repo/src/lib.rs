//! # Profast Repository
//!
//! Concrete repository implementation (adapter) for the parcel booking
//! service. This crate provides the MongoDB adapter that implements the
//! `BookingRepository` port.

mod documents;
pub mod mongo;

pub use mongo::MongoRepo;

/// Build and initialize a repository from a connection string.
///
/// This function:
/// 1. Connects to the MongoDB deployment and pings it
/// 2. Declares the unique index on `parcels.trackingId`
/// 3. Returns a ready-to-use `MongoRepo`
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("mongodb://localhost:27017", "profast").await?;
/// ```
pub async fn build_repo(uri: &str, database: &str) -> anyhow::Result<MongoRepo> {
    MongoRepo::connect(uri, database).await
}
