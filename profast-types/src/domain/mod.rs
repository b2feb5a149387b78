//! Domain models for the parcel booking service.

pub mod parcel;
pub mod payment;

pub use parcel::{Parcel, ParcelId, ParcelStatus, PaymentStatus, TrackingId};
pub use payment::{Payment, PaymentId};
