//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use profast_types::domain::PaymentStatus;
use profast_types::dto::{
    CreatePaymentIntentRequest, DeleteReport, PaymentIntentResponse, RecordPaymentRequest,
    StatusUpdate, UpdatePaymentStatusRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Plain text greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = String)
    )
)]
async fn root() {}

/// List parcels
#[utoipa::path(
    get,
    path = "/parcels",
    tag = "parcels",
    params(
        ("email" = Option<String>, Query, description = "Filter by the booking email")
    ),
    responses(
        (status = 200, description = "Parcels sorted by createdDate descending", body = inline(serde_json::Value),
            example = json!({"success": true, "message": "Parcels fetched successfully", "data": []})),
        (status = 500, description = "Store fault")
    )
)]
async fn list_parcels() {}

/// Book a new parcel
#[utoipa::path(
    post,
    path = "/parcels",
    tag = "parcels",
    request_body(content = inline(serde_json::Value), description = "Arbitrary booking fields (sender, receiver, address, weight, ...)"),
    responses(
        (status = 201, description = "Stored record with assigned trackingId", body = inline(serde_json::Value),
            example = json!({"success": true, "message": "Parcel added successfully", "data": {"trackingId": "TRK-8F2K1Q", "paymentStatus": "unpaid", "parcelStatus": "pending"}})),
        (status = 409, description = "Tracking id conflict after bounded retries"),
        (status = 500, description = "Store fault")
    )
)]
async fn create_parcel() {}

/// Get a parcel by identity
#[utoipa::path(
    get,
    path = "/parcels/{id}",
    tag = "parcels",
    params(
        ("id" = String, Path, description = "Parcel identity (24-char hex)")
    ),
    responses(
        (status = 200, description = "Single parcel record"),
        (status = 400, description = "Invalid parcel ID"),
        (status = 404, description = "Parcel not found"),
        (status = 500, description = "Store fault")
    )
)]
async fn get_parcel() {}

/// Update a parcel's payment status
#[utoipa::path(
    patch,
    path = "/parcels/{id}",
    tag = "parcels",
    request_body = UpdatePaymentStatusRequest,
    params(
        ("id" = String, Path, description = "Parcel identity (24-char hex)")
    ),
    responses(
        (status = 200, description = "Matched/modified counts", body = StatusUpdate),
        (status = 400, description = "ID and paymentStatus required"),
        (status = 404, description = "Parcel not found"),
        (status = 500, description = "Store fault")
    )
)]
async fn update_payment_status() {}

/// Delete a parcel
#[utoipa::path(
    delete,
    path = "/parcels/{id}",
    tag = "parcels",
    params(
        ("id" = String, Path, description = "Parcel identity (24-char hex)")
    ),
    responses(
        (status = 200, description = "Deletion confirmed", body = DeleteReport),
        (status = 400, description = "Invalid parcel ID"),
        (status = 404, description = "Parcel not found"),
        (status = 500, description = "Store fault")
    )
)]
async fn delete_parcel() {}

/// Create a payment intent
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Gateway-issued client secret", body = PaymentIntentResponse),
        (status = 400, description = "Missing amount"),
        (status = 500, description = "Gateway fault")
    )
)]
async fn create_payment_intent() {}

/// Record a completed payment
#[utoipa::path(
    post,
    path = "/payment-history",
    tag = "payments",
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Inserted payment record"),
        (status = 400, description = "Missing trackingId, userEmail or transactionId"),
        (status = 500, description = "Store fault")
    )
)]
async fn record_payment() {}

/// List a user's payment history
#[utoipa::path(
    get,
    path = "/payment-history",
    tag = "payments",
    params(
        ("email" = String, Query, description = "User email (required)")
    ),
    responses(
        (status = 200, description = "Payments sorted by createdAt descending"),
        (status = 400, description = "Missing email"),
        (status = 500, description = "Store fault")
    )
)]
async fn payment_history() {}

/// OpenAPI documentation for the parcel booking API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profast Parcel Booking API",
        version = "1.0.0",
        description = "A parcel-delivery booking backend: shipment records, payment records, and payment-intent creation.\n\nEvery route responds with the envelope `{success, message?, data?, error?}`.",
        license(name = "MIT"),
    ),
    paths(
        root,
        list_parcels,
        create_parcel,
        get_parcel,
        update_payment_status,
        delete_parcel,
        create_payment_intent,
        record_payment,
        payment_history,
    ),
    components(
        schemas(
            UpdatePaymentStatusRequest,
            StatusUpdate,
            DeleteReport,
            CreatePaymentIntentRequest,
            PaymentIntentResponse,
            RecordPaymentRequest,
            PaymentStatus,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "parcels", description = "Parcel booking operations"),
        (name = "payments", description = "Payment intent and history operations"),
    )
)]
pub struct ApiDoc;
