//! End-to-end tests of the HTTP API against in-memory adapters.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use profast_hex::{BookingService, HttpServer};
use profast_types::{
    BookingRepository, GatewayError, Parcel, ParcelId, Payment, PaymentGateway, PaymentIntent,
    PaymentStatus, RepoError, StatusUpdate,
};

struct MemoryRepo {
    parcels: Mutex<Vec<Parcel>>,
    payments: Mutex<Vec<Payment>>,
}

impl MemoryRepo {
    fn new() -> Self {
        Self {
            parcels: Mutex::new(Vec::new()),
            payments: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookingRepository for MemoryRepo {
    async fn insert_parcel(&self, parcel: Parcel) -> Result<Parcel, RepoError> {
        let mut parcels = self.parcels.lock().unwrap();
        if parcels.iter().any(|p| p.tracking_id == parcel.tracking_id) {
            return Err(RepoError::Conflict("E11000 duplicate key error".into()));
        }
        parcels.push(parcel.clone());
        Ok(parcel)
    }

    async fn list_parcels(&self, email: Option<&str>) -> Result<Vec<Parcel>, RepoError> {
        let mut parcels: Vec<Parcel> = self
            .parcels
            .lock()
            .unwrap()
            .iter()
            .filter(|p| email.is_none() || p.email() == email)
            .cloned()
            .collect();
        parcels.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        Ok(parcels)
    }

    async fn find_parcel(&self, id: ParcelId) -> Result<Option<Parcel>, RepoError> {
        Ok(self
            .parcels
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn set_payment_status(
        &self,
        id: ParcelId,
        status: PaymentStatus,
    ) -> Result<StatusUpdate, RepoError> {
        let mut parcels = self.parcels.lock().unwrap();
        match parcels.iter_mut().find(|p| p.id == id) {
            Some(parcel) => {
                let modified = parcel.payment_status != status;
                parcel.payment_status = status;
                Ok(StatusUpdate {
                    matched_count: 1,
                    modified_count: modified as u64,
                })
            }
            None => Ok(StatusUpdate {
                matched_count: 0,
                modified_count: 0,
            }),
        }
    }

    async fn delete_parcel(&self, id: ParcelId) -> Result<bool, RepoError> {
        let mut parcels = self.parcels.lock().unwrap();
        let before = parcels.len();
        parcels.retain(|p| p.id != id);
        Ok(parcels.len() < before)
    }

    async fn insert_payment(&self, payment: Payment) -> Result<Payment, RepoError> {
        self.payments.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    async fn list_payments(&self, email: &str) -> Result<Vec<Payment>, RepoError> {
        let mut payments: Vec<Payment> = self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_email == email)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }
}

struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_payment_intent(
        &self,
        _amount_minor: i64,
    ) -> Result<PaymentIntent, GatewayError> {
        Ok(PaymentIntent {
            id: "pi_test".into(),
            client_secret: "pi_test_secret_123".into(),
        })
    }
}

fn app() -> Router {
    let service = BookingService::new(MemoryRepo::new(), StubGateway);
    HttpServer::new(service).router()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn is_tracking_code(s: &str) -> bool {
    s.len() == 10
        && s.starts_with("TRK-")
        && s[4..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[tokio::test]
async fn test_root_returns_greeting() {
    let app = app();

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Parcel booking server is running");
}

#[tokio::test]
async fn test_create_parcel_assigns_service_fields() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/parcels", json!({"sender": "A", "receiver": "B"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Parcel added successfully");

    let data = &body["data"];
    assert!(is_tracking_code(data["trackingId"].as_str().unwrap()));
    assert_eq!(data["paymentStatus"], "unpaid");
    assert_eq!(data["parcelStatus"], "pending");
    assert_eq!(data["sender"], "A");
    assert_eq!(data["receiver"], "B");
}

#[tokio::test]
async fn test_create_parcel_ignores_forged_service_fields() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/parcels",
            json!({"trackingId": "TRK-FORGED", "paymentStatus": "paid", "sender": "A"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let raw = std::str::from_utf8(&bytes).unwrap();

    // The forged values must not survive, not even as duplicate JSON keys
    // trailing the assigned ones.
    assert_eq!(raw.matches("\"trackingId\"").count(), 1);
    assert!(!raw.contains("TRK-FORGED"));

    let body: Value = serde_json::from_str(raw).unwrap();
    assert!(is_tracking_code(body["data"]["trackingId"].as_str().unwrap()));
    assert_eq!(body["data"]["paymentStatus"], "unpaid");
    assert_eq!(body["data"]["sender"], "A");
}

#[tokio::test]
async fn test_list_parcels_filters_by_email() {
    let app = app();

    send(&app, post_json("/parcels", json!({"email": "a@b.com"}))).await;
    send(&app, post_json("/parcels", json!({"email": "c@d.com"}))).await;

    let (status, body) = send(&app, get("/parcels?email=a@b.com")).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["email"], "a@b.com");

    let (_, body) = send(&app, get("/parcels")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_parcel_round_trip() {
    let app = app();

    let (_, created) = send(&app, post_json("/parcels", json!({"sender": "A"}))).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let (status, body) = send(&app, get(&format!("/parcels/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Parcel fetched successfully");
    assert_eq!(body["data"]["_id"], id);
}

#[tokio::test]
async fn test_get_unknown_parcel_is_404() {
    let app = app();

    let id = ParcelId::new();
    let (status, body) = send(&app, get(&format!("/parcels/{id}"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Parcel not found");
}

#[tokio::test]
async fn test_get_parcel_with_malformed_id_is_400() {
    let app = app();

    let (status, body) = send(&app, get("/parcels/not-a-valid-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid parcel ID");
}

#[tokio::test]
async fn test_patch_without_status_is_400() {
    let app = app();

    let (_, created) = send(&app, post_json("/parcels", json!({}))).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/parcels/{id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID and paymentStatus required");
}

#[tokio::test]
async fn test_patch_marks_parcel_paid() {
    let app = app();

    let (_, created) = send(&app, post_json("/parcels", json!({}))).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/parcels/{id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"paymentStatus": "paid"}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment status updated");
    assert_eq!(body["data"]["matchedCount"], 1);
    assert_eq!(body["data"]["modifiedCount"], 1);

    let (_, fetched) = send(&app, get(&format!("/parcels/{id}"))).await;
    assert_eq!(fetched["data"]["paymentStatus"], "paid");
}

#[tokio::test]
async fn test_delete_parcel_then_404() {
    let app = app();

    let (_, created) = send(&app, post_json("/parcels", json!({}))).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let delete = |id: &str| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/parcels/{id}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, delete(id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Parcel deleted successfully");
    assert_eq!(body["data"]["deletedCount"], 1);

    let (status, _) = send(&app, delete(id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_payment_intent_returns_client_secret() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/create-payment-intent", json!({"amount": 49.99})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment intent created");
    assert_eq!(body["data"]["clientSecret"], "pi_test_secret_123");
}

#[tokio::test]
async fn test_create_payment_intent_without_amount_is_400() {
    let app = app();

    let (status, body) = send(&app, post_json("/create-payment-intent", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "amount is required");
}

#[tokio::test]
async fn test_record_payment_and_fetch_history() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/payment-history",
            json!({
                "trackingId": "TRK-AAAAAA",
                "userEmail": "a@b.com",
                "amount": 49.99,
                "transactionId": "pi_1",
                "status": "succeeded"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment recorded successfully");
    assert_eq!(body["data"]["trackingId"], "TRK-AAAAAA");

    let (status, body) = send(&app, get("/payment-history?email=a@b.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment history fetched successfully");
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["transactionId"], "pi_1");
}

#[tokio::test]
async fn test_record_payment_missing_fields_is_400() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/payment-history", json!({"userEmail": "a@b.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "trackingId, userEmail and transactionId are required"
    );
}

#[tokio::test]
async fn test_payment_history_requires_email() {
    let app = app();

    let (status, body) = send(&app, get("/payment-history")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email is required");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/parcels"].is_object());
}
