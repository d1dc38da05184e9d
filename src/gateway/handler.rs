use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::lookup::ProductLookup;
use crate::pipeline::types::EstimationRequest;
use crate::vision::VisionModel;

/// `POST /api/v1/estimate-jancode`.
///
/// Validates the request fields, runs the pipeline, and returns 200 for any
/// completed estimation (degraded and zero-candidate outcomes included).
#[instrument(skip(state, request), fields(product_name = tracing::field::Empty))]
pub async fn estimate_jancode_handler<V, L>(
    State(state): State<AppState<V, L>>,
    Json(request): Json<EstimationRequest>,
) -> Result<Response, GatewayError>
where
    V: VisionModel + 'static,
    L: ProductLookup + 'static,
{
    if request.product_name.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "product_name must not be empty".to_string(),
        ));
    }

    if request.product_image_url.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "product_image_url must not be empty".to_string(),
        ));
    }

    tracing::Span::current().record(
        "product_name",
        tracing::field::display(&request.product_name),
    );

    let result = state.estimator.estimate(&request).await;

    info!(
        jancode = result.jancode.as_deref().unwrap_or("-"),
        candidates = result.candidates.len(),
        confidence = result.confidence,
        "estimation complete"
    );

    Ok((StatusCode::OK, Json(result)).into_response())
}
