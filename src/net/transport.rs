//! Transport seam between request construction and the HTTP stack.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`crate::net::api::LedgerApi`] builds fully-formed [`HttpRequest`] values
//! and hands them to a [`Transport`]. The browser build sends them with
//! `gloo-net`; native builds use `reqwest`; tests substitute a recorder.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::fmt;

use super::error::ApiError;

pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_IDEMPOTENCY_KEY: &str = "Idempotency-Key";

const JSON: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// A request ready to be sent: absolute URL, headers, optional body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: vec![(HEADER_ACCEPT, JSON.to_owned())], body: None }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Append an encoded query string built from `pairs`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the pairs cannot be encoded.
    pub fn query(mut self, pairs: &[(&str, &str)]) -> Result<Self, ApiError> {
        let encoded =
            serde_urlencoded::to_string(pairs).map_err(|e| ApiError::validation("query", e.to_string()))?;
        if !encoded.is_empty() {
            self.url.push(if self.url.contains('?') { '&' } else { '?' });
            self.url.push_str(&encoded);
        }
        Ok(self)
    }

    /// Set a header, replacing any previous value with the same name.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header(HEADER_AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `body` cannot be serialized.
    pub fn json<T: serde::Serialize>(self, body: &T) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::validation("body", e.to_string()))?;
        let mut request = self.header(HEADER_CONTENT_TYPE, JSON);
        request.body = Some(raw);
        Ok(request)
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends prepared requests. Implementations only report transport failures;
/// HTTP status classification happens in the API client.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send `request` and return whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
