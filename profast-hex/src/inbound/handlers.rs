//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use profast_types::{
    AppError, BookingRepository, CreatePaymentIntentRequest, Envelope, ParcelId, PaymentGateway,
    RecordPaymentRequest, UpdatePaymentStatusRequest,
};

use crate::BookingService;

/// Application state shared across handlers.
pub struct AppState<R: BookingRepository, G: PaymentGateway> {
    pub service: BookingService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround),
/// carrying an optional route-level context message for the envelope.
pub struct ApiError {
    error: AppError,
    context: Option<&'static str>,
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        ApiError {
            error,
            context: None,
        }
    }
}

impl ApiError {
    /// Attaches the failure message a route reports in its envelope.
    pub fn with_context(error: AppError, context: &'static str) -> Self {
        ApiError {
            error,
            context: Some(context),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self.error {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                self.context.unwrap_or("Duplicate tracking id").to_string(),
                Some(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.context.unwrap_or("Request failed").to_string(),
                Some(msg),
            ),
        };

        let body = Envelope::<serde_json::Value>::fail(message, detail);
        (status, Json(body)).into_response()
    }
}

/// Query parameters carrying an optional email filter.
#[derive(Debug, serde::Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Root endpoint - plain text greeting.
pub async fn root() -> impl IntoResponse {
    "Parcel booking server is running"
}

// ─────────────────────────────────────────────────────────────────────────────
// Parcel Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// List parcels, optionally filtered by the booking email.
#[tracing::instrument(skip(state))]
pub async fn list_parcels<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let parcels = state
        .service
        .list_parcels(query.email.as_deref())
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to fetch parcels"))?;

    Ok(Json(Envelope::ok("Parcels fetched successfully", parcels)))
}

/// Book a new parcel from arbitrary caller-supplied fields.
#[tracing::instrument(skip(state, body))]
pub async fn create_parcel<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(body): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<impl IntoResponse, ApiError> {
    let parcel = state
        .service
        .book_parcel(body)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to add parcel"))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Parcel added successfully", parcel)),
    ))
}

/// Get a parcel by its identity.
#[tracing::instrument(skip(state), fields(parcel_id = %id))]
pub async fn get_parcel<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let parcel_id: ParcelId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid parcel ID".into()))?;

    let parcel = state
        .service
        .get_parcel(parcel_id)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to fetch parcel"))?;

    Ok(Json(Envelope::ok("Parcel fetched successfully", parcel)))
}

/// Update a parcel's payment status.
#[tracing::instrument(skip(state), fields(parcel_id = %id))]
pub async fn update_payment_status<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePaymentStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let parcel_id: ParcelId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid parcel ID".into()))?;

    let update = state
        .service
        .update_payment_status(parcel_id, body.payment_status)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to update payment status"))?;

    Ok(Json(Envelope::ok("Payment status updated", update)))
}

/// Delete a parcel.
#[tracing::instrument(skip(state), fields(parcel_id = %id))]
pub async fn delete_parcel<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let parcel_id: ParcelId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid parcel ID".into()))?;

    let report = state
        .service
        .delete_parcel(parcel_id)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to delete parcel"))?;

    Ok(Json(Envelope::ok("Parcel deleted successfully", report)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Create a payment intent with the gateway.
#[tracing::instrument(skip(state))]
pub async fn create_payment_intent<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(body): Json<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = state
        .service
        .create_payment_intent(body)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to create payment intent"))?;

    Ok(Json(Envelope::ok("Payment intent created", intent)))
}

/// Record a completed payment.
#[tracing::instrument(skip(state, body))]
pub async fn record_payment<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .service
        .record_payment(body)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to record payment"))?;

    Ok(Json(Envelope::ok("Payment recorded successfully", payment)))
}

/// List a user's payment history.
#[tracing::instrument(skip(state))]
pub async fn payment_history<R: BookingRepository, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .service
        .payment_history(query.email.as_deref())
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to fetch payment history"))?;

    Ok(Json(Envelope::ok(
        "Payment history fetched successfully",
        payments,
    )))
}
