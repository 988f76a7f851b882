//! The three MyVote lookup calls.
//!
//! Every reply is a `{"Success": ..., "Data": ...}` envelope; `Success`
//! false (or a missing `Data`) means "no result", not an error.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::form_urlencoded;

use ovr_model::{Method, OvrError, Result, Transport};

use crate::types::{
    RawBallotStatus, RawPollingPlace, RawVoter, WiAbsenteeBallotStatus, WiElection,
    WiVoterRegistration,
};

const API_BASE: &str = "https://myvote.wi.gov/DesktopModules/GabMyVoteModules/api";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Success", default)]
    success: bool,
    #[serde(rename = "Data")]
    data: Option<T>,
}

/// Issue one call and unwrap the envelope; `None` when the API reports no
/// result.
fn call<T: DeserializeOwned>(
    transport: &impl Transport,
    method: Method,
    url: &str,
    body: Option<&str>,
) -> Result<Option<T>> {
    let response = transport.send(method, url, body)?;
    debug!(status = response.status, url, "myvote call");
    if !response.is_success() {
        return Err(OvrError::HttpStatus {
            status: response.status,
        });
    }
    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| OvrError::Malformed(format!("reply is not a result envelope: {e}")))?;
    if !envelope.success {
        return Ok(None);
    }
    Ok(envelope.data)
}

#[derive(Debug, Deserialize)]
struct SearchData {
    voters: ValueList<RawVoter>,
}

/// The API wraps arrays in a `$values` holder.
#[derive(Debug, Deserialize)]
struct ValueList<T> {
    #[serde(rename = "$values", default = "Vec::new")]
    values: Vec<T>,
}

/// Search registrations by name and date of birth.
///
/// `Ok(None)` when the API reports no match; hits too incomplete to shape
/// are dropped from the list.
pub fn lookup_voter<T: Transport>(
    transport: &T,
    first_name: &str,
    last_name: &str,
    date_of_birth: NaiveDate,
) -> Result<Option<Vec<WiVoterRegistration>>> {
    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("firstName", first_name)
        .append_pair("lastName", last_name)
        .append_pair("birthDate", &date_of_birth.format("%m/%d/%Y").to_string())
        .finish();
    let url = format!("{API_BASE}/voter/search");
    let Some(data) = call::<SearchData>(transport, Method::Post, &url, Some(&body))? else {
        return Ok(None);
    };
    Ok(Some(
        data.voters
            .values
            .into_iter()
            .filter_map(RawVoter::shape)
            .collect(),
    ))
}

/// The next election and polling place for a voter's district.
pub fn lookup_polling_place<T: Transport>(
    transport: &T,
    district_combo_id: &str,
) -> Result<Option<WiElection>> {
    let url = format!("{API_BASE}/address/pollingplace/{district_combo_id}");
    let Some(data) = call::<RawPollingPlace>(transport, Method::Get, &url, None)? else {
        return Ok(None);
    };
    Ok(data.shape())
}

/// Absentee-ballot progress for one voter in one election.
pub fn lookup_ballot_status<T: Transport>(
    transport: &T,
    voter_id: &str,
    election_id: &str,
) -> Result<Option<WiAbsenteeBallotStatus>> {
    let url = format!("{API_BASE}/absentee/progressbarinfo/{voter_id}?electionid={election_id}");
    let Some(data) = call::<RawBallotStatus>(transport, Method::Get, &url, None)? else {
        return Ok(None);
    };
    Ok(Some(data.shape()))
}
