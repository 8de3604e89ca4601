//! HTTP routes and handlers

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Maximum accepted message length in characters
pub const MAX_MESSAGE_CHARS: usize = 10_000;

/// Request body cap, well above the message limit plus JSON overhead
const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/analyze", post(analyze))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Analysis request body
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    message: String,
}

/// Main analysis handler.
///
/// Validates the message bounds the core relies on, applies rate limiting,
/// and serializes the verdict. Analysis itself never fails; every error
/// response here is a request problem, not a classification problem.
async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    metrics::counter!("scamcheck_requests_total").increment(1);

    let caller = caller_identity(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    if !state.rate_limiter.check(&caller) {
        metrics::counter!("scamcheck_rate_limited_total").increment(1);
        warn!(%caller, "rate limit exceeded");
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Please try again later.",
        );
    }

    if request.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Message must not be empty.");
    }

    if request.message.chars().count() > MAX_MESSAGE_CHARS {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Message exceeds the 10,000 character limit.",
        );
    }

    let request_id = Uuid::new_v4();
    let start = Instant::now();
    let verdict = state.analyzer.analyze(&request.message).await;

    metrics::histogram!("scamcheck_analyze_latency_us")
        .record(start.elapsed().as_micros() as f64);
    metrics::counter!("scamcheck_verdicts_total", "level" => verdict.risk_level.as_str())
        .increment(1);
    info!(
        %request_id,
        score = verdict.risk_score,
        level = verdict.risk_level.as_str(),
        "analysis complete"
    );

    (StatusCode::OK, Json(verdict)).into_response()
}

/// Resolve the caller identity used for rate limiting: first hop of
/// `X-Forwarded-For` when present, otherwise the socket address
fn caller_identity(headers: &HeaderMap, addr: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    addr.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RateLimitConfig, ServerConfig};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use scamcheck_classifiers::MessageAnalyzer;
    use tower::ServiceExt;

    fn test_router(max_requests: u32) -> Router {
        let config = ServerConfig {
            rate_limit: RateLimitConfig {
                max_requests,
                window_secs: 60,
            },
            ..Default::default()
        };
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state =
            AppState::with_analyzer(config, handle, MessageAnalyzer::new().unwrap()).unwrap();
        create_router(state)
    }

    fn analyze_request(message: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({ "message": message })).unwrap(),
            ))
            .unwrap()
    }

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router(10)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = test_router(10)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyze_benign_message() {
        let response = test_router(10)
            .oneshot(analyze_request("Hey, are we still on for lunch tomorrow?"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["riskScore"], 0);
        assert_eq!(body["riskLevel"], "low");
        assert_eq!(body["patterns"][0], "No scam patterns detected");
    }

    #[tokio::test]
    async fn test_analyze_phishing_message() {
        let response = test_router(10)
            .oneshot(analyze_request(
                "URGENT!!! Your account is suspended. Click here to verify account now: http://bit.ly/x",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["riskLevel"], "high");
        assert!(body["suspiciousPhrases"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "verify account"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let response = test_router(10)
            .oneshot(analyze_request("   "))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_oversized_message_rejected() {
        let message = "a".repeat(MAX_MESSAGE_CHARS + 1);
        let response = test_router(10)
            .oneshot(analyze_request(&message))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_message_at_limit_accepted() {
        let message = "a".repeat(MAX_MESSAGE_CHARS);
        let response = test_router(10)
            .oneshot(analyze_request(&message))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rate_limit_enforced() {
        let router = test_router(2);

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(analyze_request("Hello there"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .clone()
            .oneshot(analyze_request("Hello there"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_forwarded_callers_limited_independently() {
        let router = test_router(1);

        for ip in ["9.9.9.9", "8.8.8.8"] {
            let request = Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .header("x-forwarded-for", ip)
                .body(Body::from(
                    serde_json::to_vec(&json!({ "message": "Hello there" })).unwrap(),
                ))
                .unwrap();

            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[test]
    fn test_caller_identity_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());

        let addr: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        assert_eq!(caller_identity(&headers, Some(addr)), "203.0.113.7");
        assert_eq!(caller_identity(&HeaderMap::new(), Some(addr)), "127.0.0.1");
        assert_eq!(caller_identity(&HeaderMap::new(), None), "unknown");
    }
}
