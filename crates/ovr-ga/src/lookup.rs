//! Registration lookup against the MVP voter-details page.
//!
//! The site has no JSON API: the query is a form POST and the reply is the
//! rendered HTML details page, scraped here with two regexes. A page without
//! the hidden `idVoter` input is a no-match page.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

use ovr_model::{Method, OvrError, Result, Transport};

use crate::counties::county_id;

pub const QUERY_ENDPOINT: &str = "https://www.mvp.sos.ga.gov/MVP/voterDetails.do";

static VOTER_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"input type="hidden" name="idVoter" id="idVoter" value="(\d+)"/>"#).unwrap()
});
static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span id=['"](\w+)['"]>([^<]*)</span>"#).unwrap());

/// One registration record scraped from the details page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GaVoterRegistration {
    pub full_name: String,
    /// Residential address lines joined with a single space.
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// Echo of the queried date of birth; the page never shows it.
    pub date_of_birth: NaiveDate,
    pub status: String,
    pub registration_date: NaiveDate,
    pub voter_reg_number: String,
}

impl GaVoterRegistration {
    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }

    /// Scrape a details page. `None` when the page has no voter record or
    /// any expected fragment is missing or unparseable.
    pub fn from_page_source(html: &str, date_of_birth: NaiveDate) -> Option<Self> {
        let html = html.replace('\n', " ");
        let voter_reg_number = VOTER_ID_RE.captures(&html)?[1].to_string();

        let spans: HashMap<&str, &str> = SPAN_RE
            .captures_iter(&html)
            .map(|c| (c.get(1).unwrap().as_str(), c.get(2).unwrap().as_str().trim()))
            .collect();
        let span = |id: &str| spans.get(id).copied();

        // "Registration Date: 01/02/2003"
        let (_, registration_date) = span("regDtSpan")?.split_once(": ")?;
        let registration_date =
            NaiveDate::parse_from_str(registration_date, "%m/%d/%Y").ok()?;
        let address1 = span("resAddress1")?;
        let address2 = span("resAddress2").unwrap_or_default();

        Some(Self {
            full_name: span("fullNameSpan")?.to_string(),
            address: format!("{address1} {address2}").trim().to_string(),
            city: span("resAddress3")?.to_string(),
            state: span("resAddress4")?.replace(',', "").trim().to_string(),
            zipcode: span("resAddress5")?.replace(',', "").trim().to_string(),
            date_of_birth,
            status: span("statuscontent")?.to_string(),
            registration_date,
            voter_reg_number,
        })
    }
}

/// Look up a voter by name, date of birth, and county.
///
/// # Errors
///
/// An unknown county fails with [`OvrError::Validation`] before any network
/// call. A non-200 reply or an unparseable page yields `Ok(None)`; only
/// transport failures are errors.
pub fn lookup_voter<T: Transport>(
    transport: &T,
    first_name: &str,
    last_name: &str,
    date_of_birth: NaiveDate,
    county: &str,
) -> Result<Option<GaVoterRegistration>> {
    let county_id = county_id(county).ok_or_else(|| {
        OvrError::validation("county", format!("{county} is not a recognized county"))
    })?;

    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("firstName", first_name)
        .append_pair("lastName", last_name)
        .append_pair("dob", &date_of_birth.format("%m/%d/%Y").to_string())
        .append_pair("county", county_id)
        .finish();

    let response = transport.send(Method::Post, QUERY_ENDPOINT, Some(&body))?;
    debug!(status = response.status, county_id, "voter details query");
    if response.status != 200 {
        return Ok(None);
    }
    Ok(GaVoterRegistration::from_page_source(&response.body, date_of_birth))
}
