//! # Stripe Gateway
//!
//! Outbound adapter implementing the `PaymentGateway` port against Stripe's
//! payment-intent API. Intents are created in a fixed currency with card as
//! the only payment method; the caller only ever chooses the amount.

use serde::Deserialize;

use profast_types::{GatewayError, PaymentGateway, PaymentIntent};

/// Fixed settlement currency for all intents.
const CURRENCY: &str = "usd";

const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Stripe payment-intent client.
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeGateway {
    /// Creates a new gateway client with the given secret key.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (for tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// The slice of Stripe's intent object this service cares about.
#[derive(Debug, Deserialize)]
struct IntentBody {
    id: String,
    client_secret: String,
}

/// Pulls `error.message` out of a Stripe error body, falling back to the
/// raw body when it doesn't parse.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait::async_trait]
impl PaymentGateway for StripeGateway {
    #[tracing::instrument(skip(self))]
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
    ) -> Result<PaymentIntent, GatewayError> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", CURRENCY.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let resp = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Rejected(extract_error_message(&body)));
        }

        let intent: IntentBody = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Request(format!("unexpected intent body: {e}")))?;

        tracing::debug!(intent_id = %intent.id, "Payment intent created");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
