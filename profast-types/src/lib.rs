//! # Profast Types
//!
//! Domain types and port traits for the parcel booking service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Parcel, TrackingId, Payment)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Parcel, ParcelId, ParcelStatus, Payment, PaymentId, PaymentStatus, TrackingId,
};
pub use dto::*;
pub use error::{AppError, RepoError};
pub use ports::{BookingRepository, GatewayError, PaymentGateway, PaymentIntent};
