use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "service": "klassen-jmx",
            "UTC_time": chrono::Utc::now().to_rfc2822(),
        })),
    )
}
