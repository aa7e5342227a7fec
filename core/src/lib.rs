//! Declarative HTTP endpoint client core.
//!
//! # Overview
//! Turns [`Endpoint`] descriptors into fully-formed [`WireRequest`] values,
//! executes them through an injected [`Transport`], and decodes the raw
//! response into a typed value or a [`NetworkError`] by content-type
//! dispatch.
//!
//! # Design
//! - Descriptors, the encoder, and the decoder are stateless; only
//!   [`ApiService`] holds collaborators, injected once at construction.
//! - The build → execute → classify → decode pipeline exists exactly once;
//!   the async and stream-returning call shapes are thin adapters over it.
//! - Encoder output is deterministic: parameter keys flatten in sorted
//!   order, so identical descriptors build byte-identical requests.
//! - Failures form a closed taxonomy — transport, decoding, or API — and
//!   every error surfaces as exactly one of the three.

pub mod decode;
pub mod encode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod logger;
pub mod request;
pub mod service;

pub use decode::{BodyDecoder, JsonDecoder};
pub use encode::Encoding;
pub use endpoint::{Authorization, Endpoint, FileUpload, Params};
pub use error::{ApiError, BoxError, NetworkError};
pub use http::{HttpMethod, Transport, WireRequest, WireResponse};
pub use logger::{NetworkLogger, NoopLogger, TracingLogger};
pub use request::build_request;
pub use service::ApiService;
