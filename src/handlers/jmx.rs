use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tokio::time::{timeout, Duration};

use crate::checker::JmxChecker;
use crate::config::AppConfig;
use crate::formatter::json::PollResponseJson;
use crate::formatter::JsonFormatter;
use crate::models::poll::PollRequest;

/// Потолок на весь батч; таймауты отдельных операций живут в клиентах
const POLL_TIMEOUT_SECS: u64 = 60;

/// Принимает батч ключей от монолита и отдаёт конверт со значениями.
pub async fn handle_poll(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<PollRequest>,
) -> (StatusCode, Json<PollResponseJson>) {
    // Ошибка формы запроса — до любых подключений
    let checker = match JmxChecker::new(&request, &config.settings) {
        Ok(checker) => checker,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonFormatter::format_failure(e.to_string())),
            )
        }
    };

    match timeout(Duration::from_secs(POLL_TIMEOUT_SECS), checker.get_values()).await {
        Ok(Ok(values)) => (StatusCode::OK, Json(JsonFormatter::format_values(&values))),
        Ok(Err(e)) => (
            StatusCode::BAD_GATEWAY,
            Json(JsonFormatter::format_failure(format!("{:#}", e))),
        ),
        Err(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(JsonFormatter::format_failure("JMX request timeout")),
        ),
    }
}
