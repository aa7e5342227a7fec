//! The endpoint descriptor contract.
//!
//! # Design
//! An [`Endpoint`] declaratively describes one logical API call; concrete
//! catalogs implement the trait directly, typically as an enum with one
//! variant per call. Descriptors are plain values created per call and hold
//! no state — everything is read once when the request is built.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::encode::Encoding;
use crate::http::HttpMethod;

/// Parameter map carried by an endpoint; values may nest arbitrarily.
pub type Params = serde_json::Map<String, Value>;

/// How a request proves who is calling. Exactly one mode applies.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Authorization {
    #[default]
    None,
    /// Injects an `Authorization: Bearer {token}` header, overwriting any
    /// header of the same name.
    BearerToken(String),
    /// Extra pairs merged into the query string; these win over the
    /// endpoint's own `query_params` on key collision.
    QueryParams(Params),
}

/// One file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Form field name of the part.
    pub param: String,
    /// File name reported in the part's disposition.
    pub name: String,
    /// MIME type of the part.
    pub mime: String,
    /// Raw file content.
    pub data: Vec<u8>,
}

impl FileUpload {
    /// File part with the conventional image-upload defaults.
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_meta(data, "image.png", "image/png", "file")
    }

    pub fn with_meta(data: Vec<u8>, name: &str, mime: &str, param: &str) -> Self {
        Self {
            param: param.to_string(),
            name: name.to_string(),
            mime: mime.to_string(),
            data,
        }
    }
}

/// Declarative description of one API call.
///
/// Only the location, method, and body encoding are mandatory; headers,
/// authorization, parameters, and attachments default to "none".
pub trait Endpoint {
    /// Scheme and host the path is resolved against.
    fn base_url(&self) -> String;

    /// Path appended to [`Endpoint::base_url`], or the absolute URL itself
    /// when [`Endpoint::is_full_path`] is `true`.
    fn path(&self) -> String;

    /// `path()` is already absolute and bypasses base-URL resolution.
    fn is_full_path(&self) -> bool {
        false
    }

    fn method(&self) -> HttpMethod;

    fn header_params(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn authorization(&self) -> Authorization {
        Authorization::None
    }

    fn query_params(&self) -> Params {
        Params::new()
    }

    fn body_params(&self) -> Params {
        Params::new()
    }

    /// Body serialization mode; also decides the request's `Content-Type`.
    fn encoding(&self) -> Encoding;

    /// Files for multipart requests.
    fn files(&self) -> Option<Vec<FileUpload>> {
        None
    }
}
