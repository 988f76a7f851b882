#![allow(missing_docs)]

use chrono::NaiveDate;

use ovr_model::OvrError;
use ovr_pa::{PaConstants, PaRegistration, Signature, SignatureFormat, build_payload};

fn constants() -> PaConstants {
    let mut constants = PaConstants::default();
    for (name, id) in [("ADAMS", "2290"), ("ALLEGHENY", "2291"), ("CLARION", "2305")] {
        constants.county.insert(name, id);
    }
    for (name, code) in [
        ("Democratic", "D"),
        ("Republican", "R"),
        ("Green", "GR"),
        ("Libertarian", "LN"),
        ("None (No Affiliation)", "NF"),
        ("Other", "OTH"),
    ] {
        constants.party.insert(name, code);
    }
    for (name, code) in [("Female", "F"), ("Male", "M"), ("Unknown", "U")] {
        constants.gender.insert(name, code);
    }
    constants
}

fn sally() -> PaRegistration {
    PaRegistration {
        first_name: "Sally".to_string(),
        last_name: "Penndot".to_string(),
        suffix: Some("XIV".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1944, 5, 2).unwrap(),
        address1: "123 A St".to_string(),
        city: "Clarion".to_string(),
        county: "Clarion".to_string(),
        zipcode: "16214".to_string(),
        party: "Democrat".to_string(),
        dl_number: Some("99007069".to_string()),
        united_states_citizen: true,
        eighteen_on_election_day: true,
        declaration: true,
        is_new: Some(true),
        ..PaRegistration::default()
    }
}

#[test]
fn canned_registration_payload() {
    let payload = build_payload(&sally(), &constants()).expect("payload");
    assert_eq!(payload["batch"], "0");
    assert_eq!(payload["FirstName"], "Sally");
    assert_eq!(payload["LastName"], "Penndot");
    assert_eq!(payload["TitleSuffix"], "XIV");
    assert_eq!(payload["DateOfBirth"], "1944-05-02");
    assert_eq!(payload["streetaddress"], "123 A St");
    assert_eq!(payload["city"], "Clarion");
    assert_eq!(payload["zipcode"], "16214");
    assert_eq!(payload["county"], "2305");
    assert_eq!(payload["politicalparty"], "D");
    assert_eq!(payload["isnewregistration"], "1");
    assert_eq!(payload["drivers-license"], "99007069");
    assert_eq!(payload["united-states-citizen"], "1");
    assert_eq!(payload["eighteen-on-election-day"], "1");
    assert_eq!(payload["declaration1"], "1");
    // absent optional fields leave their template leaves empty
    assert!(!payload.contains_key("unittype"));
    assert!(!payload.contains_key("unitnumber"));
    assert!(!payload.contains_key("ssn4"));
    assert!(!payload.contains_key("otherpoliticalparty"));
    // DL present: no continue-submit or missing-both flags
    assert!(!payload.contains_key("continueAppSubmit"));
    assert!(!payload.contains_key("donthavebothDLandSSN"));
}

#[test]
fn payload_is_deterministic() {
    let registration = sally();
    let constants = constants();
    let first = build_payload(&registration, &constants).expect("payload");
    let second = build_payload(&registration, &constants).expect("payload");
    assert_eq!(first, second);
}

#[test]
fn missing_required_field_names_it() {
    let mut registration = sally();
    registration.county = String::new();
    match build_payload(&registration, &constants()) {
        Err(OvrError::Validation { field, .. }) => assert_eq!(field, "county"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unaffirmed_declaration_fails() {
    let mut registration = sally();
    registration.declaration = false;
    match build_payload(&registration, &constants()) {
        Err(OvrError::Validation { field, .. }) => assert_eq!(field, "declaration"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unknown_county_is_an_error() {
    let mut registration = sally();
    registration.county = "Narnia".to_string();
    match build_payload(&registration, &constants()) {
        Err(OvrError::Validation { field, message }) => {
            assert_eq!(field, "county");
            assert!(message.contains("narnia"), "message: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn party_aliases_and_fallback() {
    let constants = constants();

    let mut registration = sally();
    registration.party = "none, thanks".to_string();
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["politicalparty"], "NF");

    registration.party = "Pirate".to_string();
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["politicalparty"], "OTH");
    assert_eq!(payload["otherpoliticalparty"], "pirate");
}

#[test]
fn gender_resolution() {
    let constants = constants();

    let mut registration = sally();
    registration.gender = Some("female".to_string());
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["Gender"], "F");

    // an uppercase code passes through
    registration.gender = Some("U".to_string());
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["Gender"], "U");

    registration.gender = Some("x".to_string());
    match build_payload(&registration, &constants) {
        Err(OvrError::Validation { field, .. }) => assert_eq!(field, "gender"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn registration_kind_derivation() {
    let constants = constants();

    // inferred name change
    let mut registration = sally();
    registration.is_new = None;
    registration.previous_first_name = Some("Sally".to_string());
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["name-update"], "1");
    assert!(!payload.contains_key("isnewregistration"));

    // inferred address change
    let mut registration = sally();
    registration.is_new = None;
    registration.previous_address = Some("9 Old Rd".to_string());
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["address-update"], "1");

    // nothing prior, no explicit flag: new registration
    let mut registration = sally();
    registration.is_new = None;
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["isnewregistration"], "1");

    // explicitly not new with nothing prior: party change
    let mut registration = sally();
    registration.is_new = Some(false);
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["ispartychange"], "1");
}

#[test]
fn missing_dl_and_ssn_requires_signature() {
    let constants = constants();

    let mut registration = sally();
    registration.dl_number = None;
    match build_payload(&registration, &constants) {
        Err(OvrError::Validation { field, .. }) => assert_eq!(field, "signature"),
        other => panic!("expected validation error, got {other:?}"),
    }

    registration.signature = Some(Signature::new(b"ink".to_vec(), SignatureFormat::Png));
    let payload = build_payload(&registration, &constants).expect("payload");
    assert_eq!(payload["continueAppSubmit"], "1");
    assert_eq!(payload["donthavebothDLandSSN"], "1");
    assert_eq!(payload["signatureimage"], "data:image/png;base64,aW5r");
}

#[test]
fn ssn_alone_still_continues_submit() {
    let mut registration = sally();
    registration.dl_number = None;
    registration.ssn4 = Some("1234".to_string());
    let payload = build_payload(&registration, &constants()).expect("payload");
    assert_eq!(payload["ssn4"], "1234");
    assert_eq!(payload["continueAppSubmit"], "1");
    assert!(!payload.contains_key("donthavebothDLandSSN"));
    assert!(!payload.contains_key("signatureimage"));
}
