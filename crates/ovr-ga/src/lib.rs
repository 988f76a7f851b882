//! Georgia voter registration lookup.
//!
//! Read-only: Georgia's My Voter Page has no registration submission API, so
//! this module only answers "is this person registered, and where". One
//! form POST per query over a caller-supplied [`ovr_model::Transport`].

pub mod counties;
pub mod lookup;

pub use counties::{COUNTIES, county_id};
pub use lookup::{GaVoterRegistration, QUERY_ENDPOINT, lookup_voter};
