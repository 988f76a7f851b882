//! Generic per-state adapter interface.
//!
//! Each state that supports online registration exposes the same four-step
//! shape — validate, normalize, serialize, classify the reply — behind its
//! own wire format. Implementing [`OvrAdapter`] lets a host drive any state
//! module uniformly without knowing its field names or error vocabulary.

use crate::error::Result;

/// The uniform surface of one state's registration module.
pub trait OvrAdapter {
    /// The state's typed registration request.
    type Request;
    /// What a successful submission yields (application id etc).
    type Receipt;

    /// Check the request against the state's required-field schema without
    /// touching the network.
    fn validate(&self, request: &Self::Request) -> Result<()>;

    /// Apply the state's normalization rules (address units and the like),
    /// returning a new request. Idempotent.
    fn normalize(&self, request: Self::Request) -> Self::Request;

    /// Produce the outbound wire body for a submission.
    fn serialize(&self, request: &Self::Request) -> Result<String>;

    /// Parse a reply body into a receipt or a typed error.
    fn classify_response(&self, body: &str) -> Result<Self::Receipt>;
}
