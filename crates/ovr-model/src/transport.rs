//! Caller-supplied HTTP transport.
//!
//! The library never issues HTTP requests itself: every state module takes a
//! [`Transport`] and builds complete URLs and bodies for it. This keeps the
//! core synchronous, client-agnostic, and trivially mockable in tests.

use crate::error::Result;

/// HTTP method for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Status code and body of a completed HTTP exchange.
///
/// The transport reports every completed exchange, success or not; the
/// caller decides what a non-2xx status means.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One synchronous request/response cycle.
///
/// Implementations choose headers, timeouts, and TLS policy; the library
/// supplies only the method, the full URL, and an optional body. Timeout and
/// proxy policy are entirely the implementation's responsibility.
pub trait Transport {
    /// Issue the request and return the status code and body text.
    ///
    /// # Errors
    ///
    /// Returns [`OvrError::Transport`](crate::OvrError::Transport) when the
    /// exchange could not be completed at all.
    fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<HttpResponse> {
        (**self).send(method, url, body)
    }
}
