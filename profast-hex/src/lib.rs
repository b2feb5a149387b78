//! # Profast Hex
//!
//! Application service layer and HTTP adapter for the parcel booking
//! service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: BookingRepository` and
//! `G: PaymentGateway`, allowing different adapter implementations to be
//! injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use inbound::HttpServer;
pub use service::BookingService;
