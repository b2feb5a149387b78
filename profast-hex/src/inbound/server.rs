//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use profast_types::{BookingRepository, PaymentGateway};

use super::handlers::{self, AppState};
use crate::BookingService;
use crate::openapi::ApiDoc;

/// HTTP Server for the parcel booking API.
pub struct HttpServer<R: BookingRepository, G: PaymentGateway> {
    state: Arc<AppState<R, G>>,
}

impl<R: BookingRepository, G: PaymentGateway> HttpServer<R, G> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: BookingService<R, G>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    ///
    /// CORS is wide open: the API fronts a browser single-page app served
    /// from a different origin.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route(
                "/parcels",
                get(handlers::list_parcels::<R, G>).post(handlers::create_parcel::<R, G>),
            )
            .route(
                "/parcels/{id}",
                get(handlers::get_parcel::<R, G>)
                    .patch(handlers::update_payment_status::<R, G>)
                    .delete(handlers::delete_parcel::<R, G>),
            )
            .route(
                "/create-payment-intent",
                axum::routing::post(handlers::create_payment_intent::<R, G>),
            )
            .route(
                "/payment-history",
                get(handlers::payment_history::<R, G>).post(handlers::record_payment::<R, G>),
            )
            .route("/api-docs/openapi.json", get(openapi_json))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Serves the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
