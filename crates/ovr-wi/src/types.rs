//! Shaped lookup results and their raw wire forms.
//!
//! The MyVote API nests everything in a `{"Success": ..., "Data": ...}`
//! envelope with camelCase keys and a few quirks: dates of birth use a
//! `01/01/1900` sentinel for "withheld", election dates are midnight UTC
//! with the polls' open and close clock times shipped separately, and all
//! timestamps are `%Y-%m-%dT%H:%M:%SZ`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The date-of-birth value the API returns when the real date is withheld.
const DOB_SENTINEL: &str = "01/01/1900";

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value?, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// One registration record from a voter search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiVoterRegistration {
    /// As shipped: "LAST, FIRST MIDDLE".
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// `None` when the API withholds it with the 1900 sentinel.
    pub date_of_birth: Option<NaiveDate>,
    pub status: String,
    pub status_reason: Option<String>,
    pub registration_date: NaiveDate,
    pub registration_source: Option<String>,
    pub voter_reg_number: String,
    pub voter_id: String,
    /// Key for [`lookup_polling_place`](crate::lookup_polling_place).
    pub district_combo_id: String,
    pub jurisdiction_id: String,
}

impl WiVoterRegistration {
    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }

    pub fn last_name(&self) -> &str {
        self.full_name.split(',').next().unwrap_or(&self.full_name).trim()
    }

    pub fn first_and_middle_name(&self) -> Option<&str> {
        self.full_name.split(',').nth(1).map(str::trim)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVoter {
    #[serde(rename = "voterName")]
    voter_name: Option<String>,
    #[serde(rename = "dateOfBirth")]
    date_of_birth: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    #[serde(rename = "postalCode")]
    postal_code: Option<String>,
    #[serde(rename = "voterStatusName")]
    voter_status_name: Option<String>,
    #[serde(rename = "statusReasonName")]
    status_reason_name: Option<String>,
    #[serde(rename = "registrationDate")]
    registration_date: Option<String>,
    #[serde(rename = "registrationSource")]
    registration_source: Option<String>,
    #[serde(rename = "voterRegNumber")]
    voter_reg_number: Option<String>,
    #[serde(rename = "voterID")]
    voter_id: Option<String>,
    #[serde(rename = "districtComboID")]
    district_combo_id: Option<String>,
    #[serde(rename = "jurisdictionID")]
    jurisdiction_id: Option<String>,
}

impl RawVoter {
    /// Shape one search hit, or `None` when the record is too incomplete to
    /// be useful (no registration date).
    pub(crate) fn shape(self) -> Option<WiVoterRegistration> {
        let registration_date = self
            .registration_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%m/%d/%Y").ok());
        let Some(registration_date) = registration_date else {
            debug!(voter_id = ?self.voter_id, "search hit without registration date, dropped");
            return None;
        };
        let date_of_birth = self.date_of_birth.as_deref().and_then(|dob| {
            if dob.starts_with(DOB_SENTINEL) {
                return None;
            }
            // ISO date with a useless midnight time attached
            NaiveDate::parse_from_str(dob.get(0..10)?, "%Y-%m-%d").ok()
        });
        Some(WiVoterRegistration {
            full_name: self.voter_name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            zipcode: self.postal_code.unwrap_or_default(),
            date_of_birth,
            status: self.voter_status_name.unwrap_or_default(),
            status_reason: self.status_reason_name,
            registration_date,
            registration_source: self.registration_source,
            voter_reg_number: self.voter_reg_number.unwrap_or_default(),
            voter_id: self.voter_id.unwrap_or_default(),
            district_combo_id: self.district_combo_id.unwrap_or_default(),
            jurisdiction_id: self.jurisdiction_id.unwrap_or_default(),
        })
    }
}

/// An upcoming election with its polling place, from a district lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WiElection {
    pub election_id: String,
    /// Polls open. The API ships the election date as midnight UTC and the
    /// clock times separately; they are combined here.
    pub start: DateTime<Utc>,
    /// Polls close.
    pub end: DateTime<Utc>,
    pub description: String,
    pub polling_place_ward: String,
    pub polling_place_id: String,
    pub polling_place_description: String,
    pub polling_place_address: String,
    pub polling_place_city: String,
    pub polling_place_state: String,
    pub polling_place_zipcode: String,
    pub polling_place_lat: f64,
    pub polling_place_lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPollingPlace {
    #[serde(rename = "electionID")]
    election_id: Option<String>,
    #[serde(rename = "electionDate")]
    election_date: Option<String>,
    #[serde(rename = "startTime")]
    start_time: Option<String>,
    #[serde(rename = "endTime")]
    end_time: Option<String>,
    #[serde(rename = "electionDescription")]
    election_description: Option<String>,
    #[serde(rename = "wardName")]
    ward_name: Option<String>,
    pplid: Option<String>,
    #[serde(rename = "pollingLocationName")]
    polling_location_name: Option<String>,
    #[serde(rename = "ppL_Address")]
    address: Option<String>,
    #[serde(rename = "ppL_City")]
    city: Option<String>,
    #[serde(rename = "ppL_PostalCode")]
    postal_code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl RawPollingPlace {
    /// Shape the polling-place payload; `None` when the election date or
    /// either poll time is missing or unparseable.
    pub(crate) fn shape(self) -> Option<WiElection> {
        let date = parse_timestamp(self.election_date.as_deref())?;
        let start_time = NaiveTime::parse_from_str(self.start_time.as_deref()?, "%I.%M %p").ok()?;
        let end_time = NaiveTime::parse_from_str(self.end_time.as_deref()?, "%I.%M %p").ok()?;
        let offset = |t: NaiveTime| {
            Duration::hours(i64::from(t.hour())) + Duration::minutes(i64::from(t.minute()))
        };
        let start = date + offset(start_time);
        let end = date + offset(end_time);
        Some(WiElection {
            election_id: self.election_id.unwrap_or_default(),
            start,
            end,
            description: self.election_description.unwrap_or_default(),
            polling_place_ward: self.ward_name.unwrap_or_default(),
            polling_place_id: self.pplid.unwrap_or_default(),
            polling_place_description: self.polling_location_name.unwrap_or_default(),
            polling_place_address: self.address.unwrap_or_default(),
            polling_place_city: self.city.unwrap_or_default(),
            polling_place_state: "WI".to_string(),
            polling_place_zipcode: self.postal_code.unwrap_or_default(),
            polling_place_lat: self.latitude.unwrap_or_default(),
            polling_place_lng: self.longitude.unwrap_or_default(),
        })
    }
}

/// Absentee-ballot progress for one voter and election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiAbsenteeBallotStatus {
    pub request_submitted: Option<DateTime<Utc>>,
    pub request_approved: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    pub sent: Option<DateTime<Utc>>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub received: Option<DateTime<Utc>>,
    pub returned: Option<DateTime<Utc>>,
    pub ballot_rejected: Option<bool>,
    pub request_denied: Option<bool>,
    pub ballot_received_issue: Option<String>,
    pub foreign_address: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBallotStatus {
    #[serde(rename = "absenteeRequestSubmittedDate")]
    request_submitted: Option<String>,
    #[serde(rename = "absenteeRequestApprovedDate")]
    request_approved: Option<String>,
    #[serde(rename = "absenteeBallotCreatedDate")]
    created: Option<String>,
    #[serde(rename = "absenteeBallotSentDate")]
    sent: Option<String>,
    #[serde(rename = "absenteeBallotAnticipatedDeliveryDate")]
    expected_delivery: Option<String>,
    #[serde(rename = "completedAbsenteeBallotReceivedDate")]
    received: Option<String>,
    #[serde(rename = "dateBallotReturned")]
    returned: Option<String>,
    #[serde(rename = "isDateBallotReturnedRejected")]
    ballot_rejected: Option<bool>,
    #[serde(rename = "isAbsenteeRequestDenied")]
    request_denied: Option<bool>,
    #[serde(rename = "hasAbsenteeBallotReceivedIssue")]
    ballot_received_issue: Option<String>,
    #[serde(rename = "isForeignAddress")]
    foreign_address: Option<bool>,
}

impl RawBallotStatus {
    pub(crate) fn shape(self) -> WiAbsenteeBallotStatus {
        WiAbsenteeBallotStatus {
            request_submitted: parse_timestamp(self.request_submitted.as_deref()),
            request_approved: parse_timestamp(self.request_approved.as_deref()),
            created: parse_timestamp(self.created.as_deref()),
            sent: parse_timestamp(self.sent.as_deref()),
            expected_delivery: parse_timestamp(self.expected_delivery.as_deref()),
            received: parse_timestamp(self.received.as_deref()),
            returned: parse_timestamp(self.returned.as_deref()),
            ballot_rejected: self.ballot_rejected,
            request_denied: self.request_denied,
            ballot_received_issue: self.ballot_received_issue,
            foreign_address: self.foreign_address,
        }
    }
}
