//! Parameter encoding: query strings, form/ASCII/JSON bodies, multipart.
//!
//! # Design
//! Parameters are `serde_json` maps, so callers can nest objects and arrays
//! freely. Everything except the JSON body mode goes through one flattening
//! pipeline: nested maps become `key[nested]`, arrays repeat `key[]` per
//! element, and both keys and values are percent-escaped. Keys are visited
//! in sorted order at every level — that is what makes encoder output
//! deterministic, so the same descriptor always builds the same bytes.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::endpoint::{FileUpload, Params};

/// Body serialization mode for an endpoint.
///
/// Also decides the `Content-Type` header of the built request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Body is the JSON serialization of the unflattened parameter map.
    Json,
    /// Body is the flattened query string, ASCII bytes.
    AsciiString,
    /// Body is the flattened query string, UTF-8 bytes.
    FormUrlEncoded,
    /// Body is `multipart/form-data` with the given part delimiter.
    Multipart { boundary: String },
}

impl Encoding {
    /// `Content-Type` header value announced for this encoding.
    pub fn content_type(&self) -> String {
        match self {
            Encoding::Json => "application/json".to_string(),
            Encoding::AsciiString => "text/plain".to_string(),
            Encoding::FormUrlEncoded => "application/x-www-form-urlencoded".to_string(),
            Encoding::Multipart { boundary } => {
                format!("multipart/form-data; boundary={boundary}")
            }
        }
    }
}

/// Query escape set: unreserved RFC 3986 characters plus `/` and `?` pass
/// through; the reserved set `:#[]@!$&'()*+,;=` and everything non-ASCII
/// get percent-encoded.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'?');

/// Percent-escapes a query key or value.
pub fn escape(string: &str) -> String {
    utf8_percent_encode(string, QUERY_ESCAPE).to_string()
}

/// Recursively flattens `value` under `key` into escaped `(key, value)`
/// pairs. Nested object keys are visited in sorted order; array order is
/// preserved.
fn query_components(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            let mut nested_keys: Vec<&String> = map.keys().collect();
            nested_keys.sort();
            for nested in nested_keys {
                query_components(&format!("{key}[{nested}]"), &map[nested.as_str()], out);
            }
        }
        Value::Array(items) => {
            for item in items {
                query_components(&format!("{key}[]"), item, out);
            }
        }
        Value::Bool(flag) => out.push((escape(key), escape(if *flag { "1" } else { "0" }))),
        Value::Number(number) => out.push((escape(key), escape(&number.to_string()))),
        Value::String(string) => out.push((escape(key), escape(string))),
        Value::Null => out.push((escape(key), String::new())),
    }
}

/// Flattens `params` into escaped pairs, top-level keys in sorted order.
///
/// Sorting is done explicitly rather than relying on the map's backing
/// order, which changes when `serde_json`'s `preserve_order` feature is
/// enabled anywhere in the build graph.
pub fn flattened(params: &Params) -> Vec<(String, String)> {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();

    let mut components = Vec::new();
    for key in keys {
        query_components(key, &params[key.as_str()], &mut components);
    }
    components
}

/// Sorted, flattened, escaped `k=v&k2=v2` rendering of `params`.
pub fn query_string(params: &Params) -> String {
    flattened(params)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Encodes `params` as a request body for `encoding`.
///
/// Returns `None` when serialization cannot produce bytes; callers treat an
/// absent body as empty. The multipart arm emits parameter parts only — see
/// [`multipart_body`] for the complete body with file parts and terminator.
pub fn encoded(params: &Params, encoding: &Encoding) -> Option<Vec<u8>> {
    match encoding {
        Encoding::Json => serde_json::to_vec(params).ok(),
        Encoding::FormUrlEncoded => Some(query_string(params).into_bytes()),
        // Escaped output is ASCII by construction: non-ASCII input has
        // already been percent-encoded away.
        Encoding::AsciiString => Some(query_string(params).into_bytes()),
        Encoding::Multipart { boundary } => {
            let mut data = Vec::new();
            for (key, value) in flattened(params) {
                // Array markers carry no information inside a named part.
                let key = key.replace("%5B%5D", "");
                data.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
                data.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
                );
                data.extend_from_slice(value.as_bytes());
            }
            Some(data)
        }
    }
}

/// Complete `multipart/form-data` body: parameter parts in sorted-key
/// order, then one part per file in list order, then the closing boundary.
pub fn multipart_body(params: &Params, files: &[FileUpload], boundary: &str) -> Vec<u8> {
    let encoding = Encoding::Multipart {
        boundary: boundary.to_string(),
    };
    let mut data = encoded(params, &encoding).unwrap_or_default();

    for file in files {
        data.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
        data.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.param, file.name
            )
            .as_bytes(),
        );
        data.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.mime).as_bytes());
        data.extend_from_slice(&file.data);
    }

    data.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    data
}
