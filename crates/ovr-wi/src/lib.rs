//! Wisconsin voter lookup.
//!
//! Read-only access to the MyVote API: registration search, polling-place
//! lookup by district, and absentee-ballot progress. All calls go through a
//! caller-supplied [`ovr_model::Transport`].

pub mod lookup;
pub mod types;

pub use lookup::{lookup_ballot_status, lookup_polling_place, lookup_voter};
pub use types::{WiAbsenteeBallotStatus, WiElection, WiVoterRegistration};
