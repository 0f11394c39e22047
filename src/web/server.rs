use axum::{
    extract::{multipart::Field, DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::types::AlgorithmId;
use crate::matching::engine::{MatchEngine, MatchError, MatchOutcome};
use crate::utils::validation::{validate_upload, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_FILE_FIELD_SIZE: usize = 16 * 1024 * 1024; // 16MB
pub const MAX_TEXT_FIELD_SIZE: usize = 1024 * 1024; // 1MB
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
pub struct AppState {
    pub engine: MatchEngine,
}

/// Text and pattern extracted from a multipart form
#[derive(Debug, Default)]
struct CheckForm {
    algorithm: Option<String>,
    text: Option<String>,
    text_file: Option<String>,
    pattern: Option<String>,
    pattern_file: Option<String>,
}

impl CheckForm {
    /// Typed text wins over an uploaded file
    fn into_inputs(self) -> Option<(String, String)> {
        let text = self.text.or(self.text_file)?;
        let pattern = self.pattern.or(self.pattern_file)?;
        Some((text, pattern))
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_response(
    status: StatusCode,
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    (
        status,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs, engine: MatchEngine) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, engine).await })
}

/// Routes and state without the network-facing middleware
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/algorithms", get(algorithms_handler))
        .route("/api/check", post(check_handler))
        .route("/api/compare", post(compare_handler))
        .with_state(state)
        // Two file fields plus multipart overhead
        .layer(DefaultBodyLimit::max(2 * MAX_FILE_FIELD_SIZE + 1024 * 1024))
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(engine: MatchEngine) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { engine });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = api_router(state).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Bounds the blocking match as well as slow clients
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                REQUEST_TIMEOUT,
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(100)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs, engine: MatchEngine) -> anyhow::Result<()> {
    let app = create_router(engine)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting plagscan web server at http://{addr}");
    tracing::info!(%addr, "Web server listening");

    if args.open {
        let url = format!("http://{addr}");
        browser_opened(&url, open::that(&url));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Report whether the browser launch succeeded, warning when it did not
fn browser_opened(url: &str, result: std::io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Could not open a browser; visit {url} manually");
            false
        }
    }
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// Available algorithms, in menu order
async fn algorithms_handler() -> Json<serde_json::Value> {
    let algorithms: Vec<serde_json::Value> = AlgorithmId::ALL
        .iter()
        .map(|algorithm| {
            serde_json::json!({
                "selector": algorithm.selector(),
                "name": algorithm.display_name(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": algorithms.len(),
        "algorithms": algorithms,
    }))
}

fn elapsed_ms(outcome: &MatchOutcome) -> f64 {
    outcome.report.elapsed.as_secs_f64() * 1000.0
}

fn processing_time_ms(start_time: Instant) -> u64 {
    u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn match_error_response(e: &MatchError) -> Response {
    match e {
        MatchError::UnknownAlgorithm(_) => error_response(
            StatusCode::BAD_REQUEST,
            "unknown_algorithm",
            &e.to_string(),
            None,
        ),
        MatchError::InputTooLarge { .. } => error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "input_too_large",
            "Input exceeds the maximum supported length",
            None,
        ),
    }
}

fn join_error_response(e: &tokio::task::JoinError) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "Matching failed unexpectedly",
        Some(&e.to_string()),
    )
}

/// API endpoint: one algorithm over one text/pattern pair
async fn check_handler(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let start_time = Instant::now();

    let form = match extract_check_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(selector) = form.algorithm.clone() else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "missing_algorithm",
            "Please choose an algorithm (kmp, rk or bm).",
            None,
        );
    };
    let algorithm: AlgorithmId = match selector.trim().parse() {
        Ok(algorithm) => algorithm,
        Err(e) => return match_error_response(&e),
    };

    let Some((text, pattern)) = form.into_inputs() else {
        return missing_input_response();
    };

    let task_state = Arc::clone(&state);
    let joined = tokio::task::spawn_blocking(move || {
        task_state.engine.run_with(&text, &pattern, algorithm)
    })
    .await;

    let outcome = match joined {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => return match_error_response(&e),
        Err(e) => return join_error_response(&e),
    };

    Json(serde_json::json!({
        "algorithm": outcome.algorithm,
        "algorithm_name": outcome.algorithm.display_name(),
        "percentage": outcome.report.percentage,
        "elapsed_ms": elapsed_ms(&outcome),
        "occurrences": outcome.occurrences(),
        "positions": outcome.positions,
        "text_length": outcome.text_len,
        "pattern_length": outcome.pattern_len,
        "processing_time_ms": processing_time_ms(start_time),
    }))
    .into_response()
}

/// API endpoint: every algorithm over one text/pattern pair
async fn compare_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let start_time = Instant::now();

    let form = match extract_check_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let Some((text, pattern)) = form.into_inputs() else {
        return missing_input_response();
    };

    let task_state = Arc::clone(&state);
    let joined =
        tokio::task::spawn_blocking(move || task_state.engine.compare(&text, &pattern)).await;

    let comparison = match joined {
        Ok(Ok(comparison)) => comparison,
        Ok(Err(e)) => return match_error_response(&e),
        Err(e) => return join_error_response(&e),
    };

    let results: Vec<serde_json::Value> = comparison
        .outcomes
        .iter()
        .map(|outcome| {
            serde_json::json!({
                "algorithm": outcome.algorithm,
                "algorithm_name": outcome.algorithm.display_name(),
                "percentage": outcome.report.percentage,
                "elapsed_ms": elapsed_ms(outcome),
                "occurrences": outcome.occurrences(),
                "positions": outcome.positions,
            })
        })
        .collect();
    let (text_length, pattern_length) = comparison
        .outcomes
        .first()
        .map_or((0, 0), |o| (o.text_len, o.pattern_len));

    Json(serde_json::json!({
        "results": results,
        "agree": comparison.agree,
        "text_length": text_length,
        "pattern_length": pattern_length,
        "processing_time_ms": processing_time_ms(start_time),
    }))
    .into_response()
}

fn missing_input_response() -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        "missing_input",
        "Please provide both a text and a pattern, typed or uploaded.",
        None,
    )
}

/// Extract the check form, enforcing field count and size limits
async fn extract_check_form(multipart: &mut Multipart) -> Result<CheckForm, Response> {
    let mut form = CheckForm::default();
    let mut fields_received = 0usize;

    loop {
        // Check field count limit before processing
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
                None,
            ));
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_form",
                    "Failed to parse form data.",
                    Some(&e.to_string()),
                ));
            }
        };
        fields_received += 1;

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "algorithm" => form.algorithm = read_text_field(field).await?,
            "text" => form.text = read_text_field(field).await?,
            "pattern" => form.pattern = read_text_field(field).await?,
            "text_file" => form.text_file = read_file_field(field).await?,
            "pattern_file" => form.pattern_file = read_file_field(field).await?,
            _ => {} // Ignore unknown fields
        }
    }

    Ok(form)
}

/// Typed field, trimmed; blank counts as absent
async fn read_text_field(field: Field<'_>) -> Result<Option<String>, Response> {
    let text = field.text().await.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            "invalid_form",
            "Failed to read form field.",
            Some(&e.to_string()),
        )
    })?;

    if text.len() > MAX_TEXT_FIELD_SIZE {
        return Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "text_too_large",
            "Text field size exceeds limit",
            None,
        ));
    }

    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Uploaded file, used verbatim; an empty part (no file chosen) counts as absent
async fn read_file_field(field: Field<'_>) -> Result<Option<String>, Response> {
    let filename = field.file_name().map(ToString::to_string);
    let bytes = field.bytes().await.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            "invalid_form",
            "Failed to read uploaded file.",
            Some(&e.to_string()),
        )
    })?;

    if bytes.len() > MAX_FILE_FIELD_SIZE {
        return Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "file_too_large",
            "File size exceeds limit",
            None,
        ));
    }
    if bytes.is_empty() {
        return Ok(None);
    }

    match validate_upload(filename.as_deref(), &bytes) {
        Ok((validated_filename, content)) => {
            tracing::debug!(
                filename = validated_filename.as_deref().unwrap_or("<unnamed>"),
                bytes = bytes.len(),
                "Accepted upload"
            );
            Ok(Some(content))
        }
        Err(e) => Err(validation_error_response(&e)),
    }
}

fn validation_error_response(e: &ValidationError) -> Response {
    let (error_type, message) = match e {
        ValidationError::FilenameTooLong => (
            "filename_too_long",
            "Filename exceeds maximum length limit",
        ),
        ValidationError::InvalidFilename | ValidationError::EmptyFilename => (
            "invalid_filename",
            "Filename contains invalid or dangerous characters",
        ),
        ValidationError::BinaryContent => (
            "binary_content",
            "Binary files are not supported. Please upload plain text.",
        ),
        ValidationError::InvalidFileContent => (
            "invalid_content",
            "File content is not valid UTF-8 text",
        ),
    };
    error_response(StatusCode::BAD_REQUEST, error_type, message, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    const BOUNDARY: &str = "plagscanboundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, content) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn router() -> Router {
        api_router(Arc::new(AppState {
            engine: MatchEngine::new(),
        }))
    }

    async fn post(uri: &str, parts: &[Part<'_>]) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_page() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_algorithms() {
        let request = Request::builder()
            .uri("/api/algorithms")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["algorithms"][0]["selector"], "kmp");
    }

    #[tokio::test]
    async fn test_check_inline() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "kmp"),
                Part::Text("text", "Mississippi"),
                Part::Text("pattern", "ISS"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["algorithm"], "kmp");
        assert_eq!(json["percentage"], 54.55);
        assert_eq!(json["occurrences"], 2);
        assert_eq!(json["positions"], serde_json::json!([1, 4]));
        assert_eq!(json["text_length"], 11);
        assert_eq!(json["pattern_length"], 3);
        assert!(json["elapsed_ms"].is_number());
    }

    #[tokio::test]
    async fn test_check_uploaded_files() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "bm"),
                Part::File("text_file", "essay.txt", b"aaaa"),
                Part::File("pattern_file", "quote.txt", b"aa"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["percentage"], 150.0);
    }

    #[tokio::test]
    async fn test_check_unknown_algorithm() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "xyz"),
                Part::Text("text", "abc"),
                Part::Text("pattern", "a"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_type"], "unknown_algorithm");
        assert!(json["details"].is_null());
    }

    #[tokio::test]
    async fn test_check_missing_pattern() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "rk"),
                Part::Text("text", "abc"),
                Part::Text("pattern", "   "),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_type"], "missing_input");
    }

    #[tokio::test]
    async fn test_check_rejects_binary_upload() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "kmp"),
                Part::File("text_file", "data.bin", b"\x00\x01\x02\x03binary\x00\x00\x00"),
                Part::Text("pattern", "a"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_type"], "binary_content");
    }

    #[tokio::test]
    async fn test_check_accepts_cyrillic_filename() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "kmp"),
                Part::File(
                    "text_file",
                    "курсовая работа.txt",
                    "текст работы".as_bytes(),
                ),
                Part::Text("pattern", "РАБОТЫ"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["positions"], serde_json::json!([6]));
        assert_eq!(json["percentage"], 50.0);
    }

    #[tokio::test]
    async fn test_check_rejects_hidden_filename() {
        let (status, json) = post(
            "/api/check",
            &[
                Part::Text("algorithm", "kmp"),
                Part::File("text_file", ".bashrc", b"export PATH=/bin"),
                Part::Text("pattern", "path"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_type"], "invalid_filename");
    }

    #[tokio::test]
    async fn test_too_many_fields() {
        let parts: Vec<Part<'_>> = (0..=MAX_MULTIPART_FIELDS)
            .map(|_| Part::Text("extra", "x"))
            .collect();
        let (status, json) = post("/api/check", &parts).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_type"], "field_limit_exceeded");
    }

    #[tokio::test]
    async fn test_text_field_too_large() {
        let big = "a".repeat(MAX_TEXT_FIELD_SIZE + 1);
        let (status, json) = post(
            "/api/check",
            &[Part::Text("algorithm", "kmp"), Part::Text("text", &big)],
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error_type"], "text_too_large");
    }

    #[tokio::test]
    async fn test_compare() {
        let (status, json) = post(
            "/api/compare",
            &[
                Part::Text("text", "abababab"),
                Part::Text("pattern", "aba"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["agree"], true);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        for result in results {
            assert_eq!(result["positions"], serde_json::json!([0, 2, 4]));
        }
    }

    #[test]
    fn test_browser_open_failure_is_reported() {
        assert!(browser_opened("http://127.0.0.1:8080", Ok(())));
        assert!(!browser_opened(
            "http://127.0.0.1:8080",
            Err(std::io::Error::other("no display"))
        ));
    }

    #[test]
    fn test_create_router() {
        assert!(create_router(MatchEngine::new()).is_ok());
    }

    #[test]
    fn test_safe_error_response_hides_details() {
        let response = create_safe_error_response("x", "User message", Some("secret"));
        assert_eq!(response.error, "User message");
        assert!(response.details.is_none());
    }
}
