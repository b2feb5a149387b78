//! Booking Application Service
//!
//! Orchestrates domain operations through the repository and gateway ports.
//! Contains NO infrastructure logic - pure business orchestration.

use profast_types::{
    AppError, BookingRepository, CreatePaymentIntentRequest, DeleteReport, Parcel, ParcelId,
    Payment, PaymentGateway, PaymentIntentResponse, PaymentStatus, RecordPaymentRequest,
    RepoError, StatusUpdate,
};

/// How many tracking ids to try before giving up on a booking.
///
/// A collision on the unique index is astronomically unlikely with 36^6
/// random codes, so one regeneration almost always suffices.
const MAX_TRACKING_ATTEMPTS: usize = 3;

/// Application service for booking and payment operations.
///
/// Generic over `R: BookingRepository` and `G: PaymentGateway` - the
/// adapters are injected at compile time. This enables:
/// - Swapping the store or gateway without code changes
/// - Testing with in-memory fakes
/// - Compile-time checks for port implementation
pub struct BookingService<R: BookingRepository, G: PaymentGateway> {
    repo: R,
    gateway: G,
}

impl<R: BookingRepository, G: PaymentGateway> BookingService<R, G> {
    /// Creates a new booking service with the given adapters.
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Parcel Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists parcels, newest booking first, optionally filtered by the
    /// caller-supplied `email` field.
    pub async fn list_parcels(&self, email: Option<&str>) -> Result<Vec<Parcel>, AppError> {
        self.repo.list_parcels(email).await.map_err(Into::into)
    }

    /// Books a new parcel from opaque caller-supplied fields.
    ///
    /// Assigns identity, tracking id, creation timestamp and default
    /// statuses. A duplicate-key conflict on the tracking id triggers a
    /// regeneration and re-insert, bounded by `MAX_TRACKING_ATTEMPTS`;
    /// exhaustion surfaces as a conflict to the caller.
    pub async fn book_parcel(
        &self,
        details: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Parcel, AppError> {
        let mut parcel = Parcel::new(details);

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.repo.insert_parcel(parcel.clone()).await {
                Ok(stored) => return Ok(stored),
                Err(RepoError::Conflict(_)) if attempts < MAX_TRACKING_ATTEMPTS => {
                    tracing::warn!(
                        tracking_id = %parcel.tracking_id,
                        attempt = attempts,
                        "Tracking id collision, regenerating"
                    );
                    parcel.regenerate_tracking_id();
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fetches a parcel by identity.
    pub async fn get_parcel(&self, id: ParcelId) -> Result<Parcel, AppError> {
        self.repo
            .find_parcel(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound("Parcel not found".into())))
    }

    /// Updates a parcel's payment status.
    ///
    /// Both the identity and the new status must be present; an identity
    /// that matches nothing is a not-found outcome.
    pub async fn update_payment_status(
        &self,
        id: ParcelId,
        status: Option<PaymentStatus>,
    ) -> Result<StatusUpdate, AppError> {
        let Some(status) = status else {
            return Err(AppError::BadRequest("ID and paymentStatus required".into()));
        };

        let update = self.repo.set_payment_status(id, status).await?;
        if update.matched_count == 0 {
            return Err(AppError::NotFound("Parcel not found".into()));
        }
        Ok(update)
    }

    /// Deletes a parcel. Associated payment records are left untouched.
    pub async fn delete_parcel(&self, id: ParcelId) -> Result<DeleteReport, AppError> {
        if self.repo.delete_parcel(id).await? {
            Ok(DeleteReport { deleted_count: 1 })
        } else {
            Err(AppError::NotFound("Parcel not found".into()))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a payment intent with the gateway and returns the client
    /// secret. The amount arrives in major units and is converted to the
    /// gateway's minor units.
    pub async fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, AppError> {
        let Some(amount) = req.amount else {
            return Err(AppError::BadRequest("amount is required".into()));
        };

        let amount_minor = (amount * 100.0).round() as i64;
        let intent = self.gateway.create_payment_intent(amount_minor).await?;

        Ok(PaymentIntentResponse {
            client_secret: intent.client_secret,
        })
    }

    /// Records a completed payment.
    ///
    /// Does not verify the referenced parcel exists, and does not touch the
    /// parcel's own payment status - a caller marks the parcel paid with a
    /// separate call.
    pub async fn record_payment(&self, req: RecordPaymentRequest) -> Result<Payment, AppError> {
        let (Some(tracking_id), Some(user_email), Some(transaction_id)) = (
            present(req.tracking_id),
            present(req.user_email),
            present(req.transaction_id),
        ) else {
            return Err(AppError::BadRequest(
                "trackingId, userEmail and transactionId are required".into(),
            ));
        };

        let payment = Payment::new(
            tracking_id,
            user_email,
            req.amount.unwrap_or(0.0),
            transaction_id,
            req.status.unwrap_or_default(),
        );

        self.repo.insert_payment(payment).await.map_err(Into::into)
    }

    /// Lists a user's payment history, newest first. The email is required.
    pub async fn payment_history(&self, email: Option<&str>) -> Result<Vec<Payment>, AppError> {
        match email.filter(|e| !e.is_empty()) {
            Some(email) => self.repo.list_payments(email).await.map_err(Into::into),
            None => Err(AppError::BadRequest("email is required".into())),
        }
    }
}

/// Presence check: a missing or empty string counts as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
