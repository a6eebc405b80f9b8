use axum::{extract::OriginalUri, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::router::middleware::request_metadata::RequestMetadata;

#[axum::debug_handler]
pub async fn not_found(
    request_metadata: RequestMetadata,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, Json<Value>) {
    let endpoint = uri.path();

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "message": "endpoint does not exist",
                "endpoint": endpoint,
                "request_id": request_metadata.request_id,
                "server": request_metadata.server
            }
        })),
    )
}

#[tracing::instrument]
#[axum::debug_handler]
pub async fn healthy() -> &'static str {
    "OK"
}
