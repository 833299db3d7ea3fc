use axum::Json;
use jiff::Timestamp;

use crate::model::HealthResponse;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Timestamp::now(),
    })
}
