//! Shared data model for state OVR client modules.
//!
//! State-specific crates (`ovr-pa`, `ovr-ga`, `ovr-wi`) build on the pieces
//! here: the [`OvrError`] taxonomy, the caller-supplied [`Transport`], the
//! bidirectional [`CodeTable`] enumerations, and the [`OvrAdapter`] trait
//! that gives every registration-capable state the same four-step surface.

pub mod adapter;
pub mod codes;
pub mod error;
pub mod transport;

pub use adapter::OvrAdapter;
pub use codes::CodeTable;
pub use error::{OvrError, Result};
pub use transport::{HttpResponse, Method, Transport};
