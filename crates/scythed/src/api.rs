//! HTTP transport — axum handler for decision requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tracing::info;

use scythe_core::{DecisionError, DecisionResponse, PolicyConfig, ScaleInEvent};

#[derive(Clone)]
struct ApiState {
    config: Arc<PolicyConfig>,
}

/// Serve `POST /v1/decide` until the process is stopped.
pub async fn serve(config: PolicyConfig, port: u16) -> anyhow::Result<()> {
    let state = ApiState {
        config: Arc::new(config),
    };
    let app = Router::new()
        .route("/v1/decide", post(decide))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "decision endpoint listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

/// POST /v1/decide
///
/// The body goes through the engine's own boundary validation so syntax
/// and semantic problems both surface as `MalformedEvent`. On success the
/// response is exactly the orchestrator's contract shape.
async fn decide(State(state): State<ApiState>, body: String) -> impl IntoResponse {
    let result =
        ScaleInEvent::parse(&body).and_then(|event| scythe_policy::decide(&event, &state.config));

    match result {
        Ok(audited) => (
            StatusCode::OK,
            Json(DecisionResponse::from(&audited.decision)),
        )
            .into_response(),
        Err(err) => {
            let status = match err {
                DecisionError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
                DecisionError::OversizedEvent { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            };
            (status, Json(ErrorBody {
                error: err.to_string(),
            }))
                .into_response()
        }
    }
}
