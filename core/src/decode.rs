//! Response classification and content-type dispatch.
//!
//! # Design
//! The structured decoder is an injected capability ([`BodyDecoder`]) so the
//! same pipeline serves JSON and XML APIs; this crate only decides *which*
//! decode strategy applies, based on the response's declared media type.
//! Classification is separate from decoding: a non-2xx status turns into an
//! [`NetworkError::Api`] with a best-effort extracted message before any
//! target-type decoding is attempted.

use std::any::Any;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, BoxError, NetworkError};
use crate::http::WireResponse;

/// Structured body decoder the service delegates JSON/XML bodies to.
pub trait BodyDecoder: Send + Sync {
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, BoxError>;
}

/// `serde_json`-backed decoder, the default choice for JSON APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, BoxError> {
        serde_json::from_slice(body).map_err(Into::into)
    }
}

/// Media type of the response: the `Content-Type` value up to any `;`.
fn media_type(response: &WireResponse) -> Option<String> {
    response
        .content_type()
        .map(|value| value.split(';').next().unwrap_or_default().trim().to_string())
}

/// Passes 2xx responses through; turns anything else into an `Api` failure
/// with the best message the body yields, `"Unknown"` otherwise.
pub fn classify<D: BodyDecoder>(decoder: &D, response: &WireResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    match decode_api_error(decoder, response) {
        Some(error) => Err(NetworkError::Api(error)),
        None => Err(NetworkError::Api(ApiError::unknown())),
    }
}

/// Decodes a success body into `T` by media-type dispatch.
///
/// Structured types go through the injected decoder; `text/plain` only ever
/// decodes to `String`; everything else is refused.
pub fn decode_body<T, D>(decoder: &D, response: &WireResponse) -> Result<T, NetworkError>
where
    T: DeserializeOwned + 'static,
    D: BodyDecoder,
{
    match media_type(response).as_deref() {
        Some("application/json") | Some("application/xml") | Some("text/xml") => decoder
            .decode(&response.body)
            .map_err(|e| NetworkError::Decoding(e.to_string())),
        Some("text/plain") => {
            let text = String::from_utf8_lossy(&response.body).into_owned();
            match (Box::new(text) as Box<dyn Any>).downcast::<T>() {
                Ok(text) => Ok(*text),
                Err(_) => Err(NetworkError::Decoding(
                    "text/plain can be decoded only to String".to_string(),
                )),
            }
        }
        _ => Err(NetworkError::Decoding("Invalid Content-Type".to_string())),
    }
}

/// Best-effort extraction of the API's error payload from a failure
/// response. `None` means the body had nothing usable.
fn decode_api_error<D: BodyDecoder>(decoder: &D, response: &WireResponse) -> Option<ApiError> {
    match media_type(response).as_deref() {
        Some("application/json") | Some("application/xml") | Some("text/xml") => {
            decoder.decode(&response.body).ok()
        }
        Some("text/plain") => String::from_utf8(response.body.clone())
            .ok()
            .map(|message| ApiError { message }),
        _ => None,
    }
}
