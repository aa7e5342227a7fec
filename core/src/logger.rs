//! Request/response logging seam.
//!
//! # Design
//! Logging is a side-effect-only capability: the trait returns nothing, so
//! an implementation has no way to fail a request or alter control flow.
//! The default [`TracingLogger`] emits `tracing` events; tests that want
//! silence inject [`NoopLogger`].

use crate::error::NetworkError;
use crate::http::{WireRequest, WireResponse};

/// Best-effort observer of the request pipeline.
pub trait NetworkLogger: Send + Sync {
    fn log_request(&self, request: &WireRequest);
    fn log_status(&self, status: u16);
    fn log_response(&self, response: &WireResponse);
    fn log_error(&self, error: &NetworkError);
    fn log_multipart(&self, body: &[u8]);
}

/// Logger that emits `tracing` debug/error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl NetworkLogger for TracingLogger {
    fn log_request(&self, request: &WireRequest) {
        tracing::debug!(
            url = %request.url,
            method = request.method.as_str(),
            headers = ?request.headers,
            "request"
        );
        if !request.body.is_empty() {
            tracing::debug!(body = %render_body(&request.body), "request body");
        }
    }

    fn log_status(&self, status: u16) {
        tracing::debug!(status, "response status");
    }

    fn log_response(&self, response: &WireResponse) {
        if response.body.is_empty() {
            return;
        }
        tracing::debug!(body = %render_body(&response.body), "response body");
    }

    fn log_error(&self, error: &NetworkError) {
        tracing::error!(%error, "request failed");
    }

    fn log_multipart(&self, body: &[u8]) {
        tracing::debug!(preview = %multipart_preview(body), "multipart body");
    }
}

/// Logger that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl NetworkLogger for NoopLogger {
    fn log_request(&self, _request: &WireRequest) {}
    fn log_status(&self, _status: u16) {}
    fn log_response(&self, _response: &WireResponse) {}
    fn log_error(&self, _error: &NetworkError) {}
    fn log_multipart(&self, _body: &[u8]) {}
}

/// Bodies log as JSON when they parse, raw text otherwise.
fn render_body(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// Multipart bodies can embed megabytes of file content; log a head and a
/// tail instead of the whole thing.
fn multipart_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= 600 {
        return text.into_owned();
    }
    let head: String = text.chars().take(500).collect();
    let tail_start = text
        .char_indices()
        .rev()
        .nth(99)
        .map(|(index, _)| index)
        .unwrap_or(0);
    format!("{head}(...){}", &text[tail_start..])
}
