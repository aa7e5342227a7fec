//! Inspection server for exercising the endpoint client over real HTTP.
//!
//! Stateless by design: every route answers from constants or echoes what
//! it received, so integration tests can assert on exact wire behavior —
//! content-type dispatch, error bodies, query strings, multipart uploads.

use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

pub const BEARER_TOKEN: &str = "secret-token";

/// The sample resource served by `/sample` and `/private`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sample {
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
}

impl Sample {
    fn fixture() -> Self {
        Self {
            id: Uuid::nil(),
            name: "sample".to_string(),
            tags: vec!["alpha".to_string(), "beta".to_string()],
        }
    }
}

/// What `/echo` reports back about the request it received.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub query: Option<String>,
    pub body: String,
}

/// What `/upload` reports back about a multipart body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub bytes: usize,
    pub content_type: Option<String>,
}

pub fn app() -> Router {
    Router::new()
        .route("/sample", get(sample))
        .route("/private", get(private))
        .route("/missing", get(missing))
        .route("/error", get(api_error))
        .route("/text", get(text))
        .route("/bytes", get(bytes))
        .route("/status/{code}", get(status))
        .route("/echo", post(echo))
        .route("/upload", post(upload))
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn sample() -> Json<Sample> {
    Json(Sample::fixture())
}

async fn private(headers: HeaderMap) -> Result<Json<Sample>, (StatusCode, Json<Value>)> {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {BEARER_TOKEN}"))
        .unwrap_or(false);

    if authorized {
        Ok(Json(Sample::fixture()))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        ))
    }
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

async fn api_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "Invalid cursor"})),
    )
}

async fn text() -> &'static str {
    "pong"
}

async fn bytes() -> Vec<u8> {
    vec![0xDE, 0xAD, 0xBE, 0xEF]
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    Json(Echo {
        method: method.to_string(),
        content_type: header_value(&headers, "content-type"),
        query: uri.query().map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn upload(headers: HeaderMap, body: Bytes) -> Json<UploadReceipt> {
    Json(UploadReceipt {
        bytes: body.len(),
        content_type: header_value(&headers, "content-type"),
    })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
