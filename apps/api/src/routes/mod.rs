pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        .route(
            "/api/v1/resumes/score",
            post(scoring::handle_score).layer(DefaultBodyLimit::max(scoring::UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::generator::GenerationSettings;
    use crate::llm_client::retry::RetryPolicy;
    use crate::llm_client::testing::{status, ScriptedProvider};

    const BOUNDARY: &str = "resume-api-test-boundary";

    fn state_with(provider: ScriptedProvider) -> AppState {
        AppState {
            llm: Arc::new(provider),
            generation: GenerationSettings {
                retry: RetryPolicy::new(1, 0),
                ..Default::default()
            },
        }
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn generate_request(body: Value) -> Request<Body> {
        generate_raw(body.to_string())
    }

    fn generate_raw(body: String) -> Request<Body> {
        Request::post("/api/v1/resumes/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn multipart_request(field: &str, filename: Option<&str>, content_type: &str, data: &[u8]) -> Request<Body> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/resumes/score")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(state_with(ScriptedProvider::always("")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_generate_returns_normalized_resume() {
        let provider = ScriptedProvider::always(
            "{\"summary\": \"Expert engineer.\", \"skills\": [\"C++\", \"Rust\"], \"experiences\": [{\"bullets\": [\"Shipped X with 30% gain\"]}]}",
        );
        let request = generate_request(json!({
            "fullName": "Ada Lovelace",
            "email": "ada@x.com",
            "experiences": [{
                "role": "Engineer",
                "company": "Acme",
                "startDate": "2020-01",
                "current": true,
                "highlights": ["Did X"]
            }],
            "skills": ["C++"]
        }));

        let (status, body) = send(state_with(provider), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["generated"], true);
        assert_eq!(body["resume"]["header"]["fullName"], "Ada Lovelace");
        assert_eq!(body["resume"]["summary"], "Expert engineer.");
        assert_eq!(body["resume"]["experiences"][0]["end"], "Present");
        assert_eq!(body["resume"]["projects"], json!([]));
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_identity() {
        for payload in [
            json!({"fullName": "  ", "email": "ada@x.com"}),
            json!({"fullName": "Ada"}),
        ] {
            let (status, body) =
                send(state_with(ScriptedProvider::always("{}")), generate_request(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(body["error"]["message"], "Invalid payload");
        }
    }

    #[tokio::test]
    async fn test_generate_null_identity_is_invalid_payload() {
        let request = generate_request(json!({"fullName": null, "email": "ada@x.com"}));
        let (status, body) = send(state_with(ScriptedProvider::always("{}")), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["message"], "Invalid payload");
    }

    #[tokio::test]
    async fn test_generate_malformed_body_uses_error_envelope() {
        for raw in [
            "{\"fullName\": \"Ada\"".to_string(),
            json!({"fullName": "Ada", "email": "ada@x.com", "skills": 5}).to_string(),
            json!({"fullName": "Ada", "email": "ada@x.com", "experiences": [{"highlights": "one"}]})
                .to_string(),
        ] {
            let (status, body) =
                send(state_with(ScriptedProvider::always("{}")), generate_raw(raw.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
            assert_eq!(body["success"], false);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(body["error"]["message"], "Invalid payload");
        }
    }

    #[tokio::test]
    async fn test_generate_tolerates_null_collections() {
        let request = generate_request(json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "links": null,
            "skills": null,
            "experiences": [{"role": "Engineer", "company": "Acme", "highlights": null}]
        }));
        let (status, body) =
            send(state_with(ScriptedProvider::always("not json")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generated"], false);
        assert_eq!(body["resume"]["header"]["links"], json!([]));
        assert_eq!(body["resume"]["skills"], json!([]));
        assert_eq!(body["resume"]["experiences"][0]["company"], "Acme");
        assert_eq!(body["resume"]["experiences"][0]["bullets"], json!([]));
    }

    #[tokio::test]
    async fn test_generate_busy_maps_to_429() {
        let provider = ScriptedProvider::new(vec![Err(status(429))]);
        let request = generate_request(json!({"fullName": "Ada", "email": "ada@x.com"}));
        let (status, body) = send(state_with(provider), request).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], "AI_BUSY");
        assert_eq!(body["error"]["message"], "AI busy. Please retry shortly.");
    }

    #[tokio::test]
    async fn test_generate_falls_back_on_garbage() {
        let request = generate_request(json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "summary": "Original."
        }));
        let (status, body) =
            send(state_with(ScriptedProvider::always("no json here")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generated"], false);
        assert_eq!(body["resume"]["summary"], "Original.");
    }

    #[tokio::test]
    async fn test_score_requires_file() {
        let request = multipart_request("note", None, "text/plain", b"hello");
        let (status, body) = send(state_with(ScriptedProvider::always("{}")), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Resume file is required.");
    }

    #[tokio::test]
    async fn test_score_rejects_non_pdf() {
        let request = multipart_request("resume", Some("cv.png"), "image/png", b"\x89PNG");
        let (status, body) = send(state_with(ScriptedProvider::always("{}")), request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["message"], "Please upload a PDF file.");
    }

    #[tokio::test]
    async fn test_score_rejects_oversized_pdf() {
        let data = vec![b'x'; scoring::MAX_UPLOAD_BYTES + 1];
        let request = multipart_request("resume", Some("cv.pdf"), "application/pdf", &data);
        let (status, body) = send(state_with(ScriptedProvider::always("{}")), request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["message"], "PDF is too large. Max 5MB.");
    }

    #[tokio::test]
    async fn test_score_rejects_unreadable_pdf() {
        let request = multipart_request("resume", Some("cv.pdf"), "application/pdf", b"garbage");
        let provider = ScriptedProvider::always("{}");
        let (status, body) = send(state_with(provider), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Unable to read text from this PDF. Please upload a text-based resume."
        );
    }
}
