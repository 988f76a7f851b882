//! Blocking reqwest transport.
//!
//! The only HTTP client in the workspace; the library crates stay
//! client-agnostic behind [`Transport`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use ovr_model::{HttpResponse, Method, OvrError, Result, Transport};

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| OvrError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<HttpResponse> {
        let request = match method {
            Method::Get => self.client.get(url),
            Method::Post => {
                let request = self.client.post(url);
                match body {
                    // the PA API wants the JSON envelope declared as such
                    Some(body) if body.starts_with('{') => request
                        .header(CONTENT_TYPE, "application/json")
                        .body(body.to_string()),
                    Some(body) => request
                        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(body.to_string()),
                    None => request,
                }
            }
        };
        let response = request.send().map_err(|e| OvrError::Transport {
            message: format!("{method} {url} failed: {e}", method = method.as_str()),
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| OvrError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;
        Ok(HttpResponse { status, body })
    }
}
