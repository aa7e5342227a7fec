//! Wire-level request/response types and the transport seam.
//!
//! # Design
//! `WireRequest` and `WireResponse` describe HTTP traffic as plain data.
//! The core builds `WireRequest` values and interprets `WireResponse`
//! values without ever touching the network — the [`Transport`]
//! implementation injected into the service is responsible for the actual
//! I/O. This separation keeps the pipeline deterministic and easy to test
//! against canned responses.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::BoxError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Wire spelling of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A fully built HTTP request described as plain data.
///
/// Produced by [`crate::request::build_request`]. Headers live in a
/// `BTreeMap` so building the same descriptor twice yields identical
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// A raw HTTP response as the transport observed it.
///
/// Header names keep whatever casing the server sent; lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Value of the `Content-Type` header, if the server sent one.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes built requests. The only collaborator that touches the network,
/// injected into the service so tests can swap it for a canned one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, BoxError>;
}
