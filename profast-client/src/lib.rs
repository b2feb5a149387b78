//! # Profast Client SDK
//!
//! A typed Rust client for the parcel booking API.

use profast_types::{
    CreatePaymentIntentRequest, DeleteReport, Envelope, Parcel, ParcelId, Payment,
    PaymentIntentResponse, PaymentStatus, RecordPaymentRequest, StatusUpdate,
    UpdatePaymentStatusRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parcel booking API client.
pub struct BookingClient {
    base_url: String,
    http: Client,
}

impl BookingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks that the server is up.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(&self.base_url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Lists parcels, optionally filtered by the booking email.
    pub async fn list_parcels(&self, email: Option<&str>) -> Result<Vec<Parcel>, ClientError> {
        let mut req = self.http.get(format!("{}/parcels", self.base_url));
        if let Some(email) = email {
            req = req.query(&[("email", email)]);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    /// Books a new parcel from arbitrary booking fields.
    pub async fn book_parcel(
        &self,
        details: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Parcel, ClientError> {
        self.post("/parcels", details).await
    }

    /// Gets a parcel by its identity.
    pub async fn get_parcel(&self, id: ParcelId) -> Result<Parcel, ClientError> {
        self.get(&format!("/parcels/{id}")).await
    }

    /// Updates a parcel's payment status.
    pub async fn update_payment_status(
        &self,
        id: ParcelId,
        status: PaymentStatus,
    ) -> Result<StatusUpdate, ClientError> {
        let req = UpdatePaymentStatusRequest {
            payment_status: Some(status),
        };
        let resp = self
            .http
            .patch(format!("{}/parcels/{}", self.base_url, id))
            .json(&req)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Deletes a parcel.
    pub async fn delete_parcel(&self, id: ParcelId) -> Result<DeleteReport, ClientError> {
        let resp = self
            .http
            .delete(format!("{}/parcels/{}", self.base_url, id))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Creates a payment intent for the given amount in major units.
    pub async fn create_payment_intent(
        &self,
        amount: f64,
    ) -> Result<PaymentIntentResponse, ClientError> {
        let req = CreatePaymentIntentRequest {
            amount: Some(amount),
        };
        self.post("/create-payment-intent", &req).await
    }

    /// Records a completed payment.
    pub async fn record_payment(
        &self,
        req: &RecordPaymentRequest,
    ) -> Result<Payment, ClientError> {
        self.post("/payment-history", req).await
    }

    /// Fetches a user's payment history, newest first.
    pub async fn payment_history(&self, email: &str) -> Result<Vec<Payment>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/payment-history", self.base_url))
            .query(&[("email", email)])
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Unwraps the `{success, message?, data?, error?}` envelope, turning a
    /// failure envelope into `ClientError::Api` with the server's message.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            let envelope: Envelope<T> = serde_json::from_str(&body)?;
            envelope.data.ok_or_else(|| ClientError::Api {
                status: status.as_u16(),
                message: "response envelope carried no data".to_string(),
            })
        } else {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
