//! Field mapping and validation.
//!
//! Turns a [`PaRegistration`] into the flat wire-name -> value payload the
//! XML template expects. All validation happens here, before any network
//! call: missing required fields, unresolvable enumerations, and the
//! DL/SSN/signature cross-check each fail with a [`OvrError::Validation`]
//! naming the offending field. There is no partial or soft mode — the
//! payload is produced whole or not at all, and building it twice from the
//! same request yields byte-identical output.

use std::collections::BTreeMap;

use ovr_model::{OvrError, Result};

use crate::constants::PaConstants;
use crate::request::PaRegistration;

/// Optional fields copied verbatim under their wire names.
const OPTIONAL_VERBATIM: &[(&str, fn(&PaRegistration) -> Option<&str>)] = &[
    ("MiddleName", |r| r.middle_name.as_deref()),
    ("TitleSuffix", |r| r.suffix.as_deref()),
    ("streetaddress2", |r| r.address2.as_deref()),
    ("unittype", |r| r.unit_type.as_deref()),
    ("unitnumber", |r| r.unit_number.as_deref()),
    ("Email", |r| r.email.as_deref()),
    ("Phone", |r| r.phone.as_deref()),
    ("drivers-license", |r| r.dl_number.as_deref()),
    ("ssn4", |r| r.ssn4.as_deref()),
    ("previousregfirstname", |r| r.previous_first_name.as_deref()),
    ("previousregmiddlename", |r| r.previous_middle_name.as_deref()),
    ("previousreglastname", |r| r.previous_last_name.as_deref()),
    ("previousregaddress", |r| r.previous_address.as_deref()),
    ("previousregcity", |r| r.previous_city.as_deref()),
    ("previousregstate", |r| r.previous_state.as_deref()),
    ("previousregzip", |r| r.previous_zipcode.as_deref()),
    ("previousregcounty", |r| r.previous_county.as_deref()),
    ("previousregyear", |r| r.previous_year.as_deref()),
    ("mailingaddress", |r| r.mailing_address.as_deref()),
    ("mailingcity", |r| r.mailing_city.as_deref()),
    ("mailingstate", |r| r.mailing_state.as_deref()),
    ("mailingzipcode", |r| r.mailing_zipcode.as_deref()),
    ("mailinballotaddr", |r| r.mailin_ballot_address.as_deref()),
    ("mailincity", |r| r.mailin_ballot_city.as_deref()),
    ("mailinstate", |r| r.mailin_ballot_state.as_deref()),
    ("mailinzipcode", |r| r.mailin_ballot_zipcode.as_deref()),
];

/// Build the flat submission payload, or fail with a validation error
/// naming the first offending field.
pub fn build_payload(
    registration: &PaRegistration,
    constants: &PaConstants,
) -> Result<BTreeMap<String, String>> {
    require_nonempty("first_name", &registration.first_name)?;
    require_nonempty("last_name", &registration.last_name)?;
    require_nonempty("address1", &registration.address1)?;
    require_nonempty("city", &registration.city)?;
    require_nonempty("county", &registration.county)?;
    require_nonempty("zipcode", &registration.zipcode)?;
    require_nonempty("party", &registration.party)?;
    require_affirmed("united_states_citizen", registration.united_states_citizen)?;
    require_affirmed("eighteen_on_election_day", registration.eighteen_on_election_day)?;
    require_affirmed("declaration", registration.declaration)?;

    let mut vals = BTreeMap::new();
    vals.insert("batch".to_string(), "0".to_string());
    vals.insert("united-states-citizen".to_string(), "1".to_string());
    vals.insert("eighteen-on-election-day".to_string(), "1".to_string());
    vals.insert("declaration1".to_string(), "1".to_string());

    vals.insert("FirstName".to_string(), registration.first_name.clone());
    vals.insert("LastName".to_string(), registration.last_name.clone());
    vals.insert(
        "DateOfBirth".to_string(),
        registration.date_of_birth.format("%Y-%m-%d").to_string(),
    );
    vals.insert("streetaddress".to_string(), registration.address1.clone());
    vals.insert("city".to_string(), registration.city.clone());
    vals.insert("zipcode".to_string(), registration.zipcode.clone());

    vals.insert(
        "county".to_string(),
        resolve_county(&registration.county, constants)?,
    );
    let (party_code, other_party) = resolve_party(&registration.party, constants)?;
    vals.insert("politicalparty".to_string(), party_code);
    if let Some(other) = other_party {
        vals.insert("otherpoliticalparty".to_string(), other);
    }
    if let Some(gender) = registration.gender.as_deref() {
        vals.insert("Gender".to_string(), resolve_gender(gender, constants)?);
    }

    for (wire_name, get) in OPTIONAL_VERBATIM {
        if let Some(value) = get(registration)
            && !value.is_empty()
        {
            vals.insert((*wire_name).to_string(), value.to_string());
        }
    }
    if let Some(federal) = registration.federal_voter {
        vals.insert("isfederalvoter".to_string(), render_bool(federal));
    }
    if let Some(mailin) = registration.mailin_ballot_request {
        vals.insert("ismailin".to_string(), render_bool(mailin));
    }
    if let Some(address_type) = registration.mailin_ballot_address_type {
        vals.insert("mailinaddresstype".to_string(), address_type.code().to_string());
    }

    vals.insert(registration_kind_flag(registration).to_string(), "1".to_string());

    // DL / SSN / signature cross-validation
    if registration.dl_number.is_none() {
        vals.insert("continueAppSubmit".to_string(), "1".to_string());
    }
    if registration.dl_number.is_none() && registration.ssn4.is_none() {
        vals.insert("donthavebothDLandSSN".to_string(), "1".to_string());
        if registration.signature.is_none() {
            return Err(OvrError::validation(
                "signature",
                "signature image required when DL and SSN are both missing",
            ));
        }
    }
    if let Some(signature) = &registration.signature {
        vals.insert("signatureimage".to_string(), signature.to_data_uri());
    }

    Ok(vals)
}

/// Which registration-kind leaf gets set.
///
/// An explicit `is_new` is honored; otherwise the kind is inferred from the
/// prior-registration fields, defaulting to a new registration. An explicit
/// not-new with no prior fields is a party change.
fn registration_kind_flag(registration: &PaRegistration) -> &'static str {
    match registration.is_new {
        Some(true) => "isnewregistration",
        Some(false) | None => {
            if registration.previous_first_name.is_some() {
                "name-update"
            } else if registration.previous_address.is_some() {
                "address-update"
            } else if registration.is_new == Some(false) {
                "ispartychange"
            } else {
                "isnewregistration"
            }
        }
    }
}

/// Unknown counties are an error, never a fallback.
fn resolve_county(county: &str, constants: &PaConstants) -> Result<String> {
    constants
        .county
        .code(county)
        .map(String::from)
        .ok_or_else(|| {
            OvrError::validation(
                "county",
                format!("county {:?} is not recognized by the API", county.to_lowercase()),
            )
        })
}

/// Party resolution with the documented aliases; an unmatched party falls
/// back to the "other" code with the free text carried alongside.
fn resolve_party(party: &str, constants: &PaConstants) -> Result<(String, Option<String>)> {
    let mut party = party.to_lowercase();
    if party == "democrat" {
        party = "democratic".to_string();
    } else if party.starts_with("none") {
        party = "none (no affiliation)".to_string();
    }
    if let Some(code) = constants.party.code(&party) {
        return Ok((code.to_string(), None));
    }
    let other = constants.party.code("other").ok_or_else(|| {
        OvrError::validation("party", "party table has no \"other\" fallback code")
    })?;
    Ok((other.to_string(), Some(party)))
}

/// A gender resolves through the table, or passes through when it is
/// already one of the uppercase codes.
fn resolve_gender(gender: &str, constants: &PaConstants) -> Result<String> {
    if let Some(code) = constants.gender.code(gender) {
        return Ok(code.to_string());
    }
    if gender == gender.to_uppercase() && constants.gender.contains_code(gender) {
        return Ok(gender.to_string());
    }
    Err(OvrError::validation(
        "gender",
        format!("gender {gender:?} is not recognized by the API"),
    ))
}

fn require_nonempty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(OvrError::validation(field, "field is required"));
    }
    Ok(())
}

fn require_affirmed(field: &str, value: bool) -> Result<()> {
    if !value {
        return Err(OvrError::validation(field, "declaration must be affirmed"));
    }
    Ok(())
}

fn render_bool(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}
