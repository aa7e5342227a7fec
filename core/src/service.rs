//! The service facade: build → execute → classify → decode.
//!
//! # Design
//! One internal pipeline ([`ApiService::round_trip`] plus the decode step)
//! backs every public call shape. The async methods and the stream-returning
//! methods are thin adapters over it, so both surface identical
//! [`NetworkError`] values for identical inputs, and each logical call
//! performs exactly one transport round-trip.

use std::sync::Arc;

use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;

use crate::decode::{self, BodyDecoder};
use crate::encode::Encoding;
use crate::endpoint::Endpoint;
use crate::error::NetworkError;
use crate::http::{Transport, WireResponse};
use crate::logger::{NetworkLogger, TracingLogger};
use crate::request::build_request;

/// Runs endpoint descriptors against a remote API.
///
/// Collaborators are injected once at construction and stay fixed for the
/// service's lifetime; the service itself holds no per-call state, so one
/// instance serves any number of concurrent calls.
pub struct ApiService<D> {
    transport: Arc<dyn Transport>,
    decoder: D,
    logger: Arc<dyn NetworkLogger>,
}

impl<D: BodyDecoder> ApiService<D> {
    /// Service with the default `tracing`-backed logger.
    pub fn new(transport: Arc<dyn Transport>, decoder: D) -> Self {
        Self::with_logger(transport, decoder, Arc::new(TracingLogger))
    }

    pub fn with_logger(
        transport: Arc<dyn Transport>,
        decoder: D,
        logger: Arc<dyn NetworkLogger>,
    ) -> Self {
        Self {
            transport,
            decoder,
            logger,
        }
    }

    /// Executes `endpoint` and decodes the response into `T` by
    /// content-type dispatch.
    pub async fn request<T, E>(&self, endpoint: &E) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + 'static,
        E: Endpoint + ?Sized,
    {
        let response = self.round_trip(endpoint).await?;
        decode::classify(&self.decoder, &response)?;
        decode::decode_body(&self.decoder, &response)
    }

    /// Executes `endpoint` and returns the body bytes verbatim, skipping
    /// content-type dispatch. The 2xx status check still applies.
    pub async fn request_raw<E>(&self, endpoint: &E) -> Result<Vec<u8>, NetworkError>
    where
        E: Endpoint + ?Sized,
    {
        let response = self.round_trip(endpoint).await?;
        decode::classify(&self.decoder, &response)?;
        Ok(response.body)
    }

    /// Push-style form of [`ApiService::request`]: yields the single result
    /// and completes. The transport is invoked at most once, on first poll.
    pub fn request_stream<'a, T, E>(
        &'a self,
        endpoint: &'a E,
    ) -> impl Stream<Item = Result<T, NetworkError>> + 'a
    where
        T: DeserializeOwned + 'static,
        E: Endpoint + ?Sized,
    {
        stream::once(self.request(endpoint))
    }

    /// Push-style form of [`ApiService::request_raw`].
    pub fn request_raw_stream<'a, E>(
        &'a self,
        endpoint: &'a E,
    ) -> impl Stream<Item = Result<Vec<u8>, NetworkError>> + 'a
    where
        E: Endpoint + ?Sized,
    {
        stream::once(self.request_raw(endpoint))
    }

    /// Build, log, execute once, log. Dropping the returned future cancels
    /// the in-flight call before any decoding happens.
    async fn round_trip<E>(&self, endpoint: &E) -> Result<WireResponse, NetworkError>
    where
        E: Endpoint + ?Sized,
    {
        let request = build_request(endpoint)?;

        self.logger.log_request(&request);
        if matches!(endpoint.encoding(), Encoding::Multipart { .. }) {
            self.logger.log_multipart(&request.body);
        }

        match self.transport.execute(&request).await {
            Ok(response) => {
                self.logger.log_status(response.status);
                self.logger.log_response(&response);
                Ok(response)
            }
            Err(error) => {
                let error = NetworkError::Network(error.to_string());
                self.logger.log_error(&error);
                Err(error)
            }
        }
    }
}
