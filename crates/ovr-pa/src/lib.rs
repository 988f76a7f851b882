//! Pennsylvania online voter registration client.
//!
//! The module translates a typed [`PaRegistration`] into the PA OVR API's
//! XML-in-JSON wire format and classifies its ad hoc error vocabulary into
//! the shared [`ovr_model::OvrError`] taxonomy. A [`PaSession`] drives the
//! protocol over a caller-supplied [`ovr_model::Transport`]:
//!
//! 1. [`PaSession::setup`] fetches the code tables and XML template;
//! 2. address-unit normalization rewrites the address fields;
//! 3. payload building validates and maps fields to wire names;
//! 4. the template is filled, serialized, and submitted;
//! 5. the reply is classified into a [`PaReceipt`] or a typed error.

pub mod constants;
pub mod document;
pub mod payload;
pub mod request;
pub mod response;
pub mod session;

pub use constants::{PaConstants, PaElectionInfo};
pub use payload::build_payload;
pub use request::{MailinAddressType, PaRegistration, Signature, SignatureFormat};
pub use response::{PaReceipt, RemoteErrorCode};
pub use session::{PROD_URL, PaCounty, PaMunicipality, PaSession, STAGING_URL};
