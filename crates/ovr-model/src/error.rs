use thiserror::Error;

/// Error taxonomy shared by every state module.
///
/// Everything is raised synchronously to the caller of the submission or
/// lookup call; nothing is swallowed or retried except the single
/// read-only-key probe performed by a session after an `AccessKey` rejection
/// of a write call.
#[derive(Debug, Error)]
pub enum OvrError {
    /// Locally detected before any network call: missing required field,
    /// unresolvable enumeration value, missing or malformed signature.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The transport collaborator failed outright (connection refused,
    /// timeout, ...). Fatal for the call.
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The remote answered with a non-success HTTP status. Fatal for the
    /// call; never retried.
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The remote rejected the API key as invalid.
    #[error("access key rejected: {0}")]
    AccessKey(String),

    /// The key is valid for read-only calls but lacks write permission.
    /// Derived by the confirmatory probe, never reported by the remote
    /// directly.
    #[error("access key is read-only: {0}")]
    ReadOnlyKey(String),

    /// Remote-specific rejection of the driver's-license/ID field.
    #[error("driver's license rejected: {0}")]
    DriverLicense(String),

    /// Remote-specific rejection of the uploaded signature image.
    #[error("signature rejected: {0}")]
    Signature(String),

    /// Catch-all for any other remote-reported error code, or for a
    /// response carrying neither an error nor an application id.
    #[error("registration rejected: {0}")]
    Rejected(String),

    /// The reply body could not be decoded or had an unexpected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A call that needs the setup tables was made before `setup()`
    /// completed. Caller misuse, not a remote condition.
    #[error("session is not ready: {0}")]
    NotReady(String),
}

impl OvrError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OvrError>;
