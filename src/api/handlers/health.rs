use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{api::response::ApiResponse, utils::app_config::AppConfig};

/// GET /health
pub async fn health(State(app_config): State<AppConfig>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(
        "ok",
        json!({
            "status": "ok",
            "store": app_config.store.backend_name(),
        }),
    ))
}
