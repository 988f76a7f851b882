//! PA OVR session: URL building, the setup sequence, and per-call dispatch.
//!
//! A session starts uninitialized, becomes ready after [`PaSession::setup`]
//! fetches the error table, the application-setup tables, and the XML
//! template, and then processes independent calls. There is no cross-request
//! state beyond those read-only tables, no retry, and no concurrency; the
//! one deliberate extra call is the read-only-key probe in
//! [`PaSession::register`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use ovr_address::{Address, UnitVocabulary, normalize_unit};
use ovr_model::{Method, OvrAdapter, OvrError, Result, Transport};

use crate::constants::{PaConstants, PaElectionInfo};
use crate::document::{Element, fill_template, unwrap_reply, wrap_submission};
use crate::payload::build_payload;
use crate::request::PaRegistration;
use crate::response::{PaReceipt, extract_receipt, raise_remote_errors};

pub const STAGING_URL: &str = "https://paovrwebapi.beta.votespa.com/SureOVRWebAPI/api/ovr";
pub const PROD_URL: &str = "https://paovrwebapi.votespa.com/SureOVRWebAPI/api/ovr";

mod action {
    pub const GET_ERROR_VALUES: &str = "GETERRORVALUES";
    pub const GET_APPLICATION_SETUP: &str = "GETAPPLICATIONSETUP";
    pub const GET_XML_TEMPLATE: &str = "GETXMLTEMPLATE";
    pub const GET_MUNICIPALITIES: &str = "GETMUNICIPALITIES";
    pub const SET_APPLICATION: &str = "SETAPPLICATION";
}

/// A session against the PA OVR API.
///
/// Holds the API key, the staging/production flag, the language code, and —
/// after setup — the constants and XML template. Not thread-safe: one
/// logical workflow at a time. The constants may be shared read-only.
pub struct PaSession<T: Transport> {
    transport: T,
    api_key: String,
    staging: bool,
    language: u32,
    constants: Option<PaConstants>,
    template: Option<Element>,
}

impl<T: Transport> PaSession<T> {
    /// Create an uninitialized session. Call [`setup`](Self::setup) before
    /// anything that needs the code tables or template.
    pub fn new(transport: T, api_key: impl Into<String>, staging: bool) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            staging,
            language: 0,
            constants: None,
            template: None,
        }
    }

    /// Override the language code (default 0).
    pub fn with_language(mut self, language: u32) -> Self {
        self.language = language;
        self
    }

    fn base_url(&self) -> &'static str {
        if self.staging { STAGING_URL } else { PROD_URL }
    }

    fn url_for(&self, action: &str) -> String {
        format!(
            "{}?JSONv2&sysparm_AuthKey={}&sysparm_action={}&sysparm_Language={}",
            self.base_url(),
            self.api_key,
            action,
            self.language
        )
    }

    /// Fetch the error table, the application-setup tables, and the XML
    /// template, in that order. Must complete before any mutating call.
    pub fn setup(&mut self) -> Result<()> {
        let mut constants = PaConstants::default();

        let errors = self.do_request(action::GET_ERROR_VALUES, None)?;
        constants.apply_error_values(&errors);

        let setup = self.do_request(action::GET_APPLICATION_SETUP, None)?;
        constants.apply_setup(&setup)?;

        let template = self.do_request(action::GET_XML_TEMPLATE, None)?;
        debug!(
            errors = constants.error.len(),
            counties = constants.county.len(),
            "session setup complete"
        );

        self.constants = Some(constants);
        self.template = Some(template);
        Ok(())
    }

    /// The fetched code tables.
    pub fn constants(&self) -> Result<&PaConstants> {
        self.constants
            .as_ref()
            .ok_or_else(|| OvrError::NotReady("setup() has not completed".to_string()))
    }

    fn template(&self) -> Result<&Element> {
        self.template
            .as_ref()
            .ok_or_else(|| OvrError::NotReady("setup() has not completed".to_string()))
    }

    /// Upcoming election dates and declaration texts.
    pub fn election_info(&self) -> Result<PaElectionInfo> {
        Ok(self.constants()?.election_info())
    }

    /// Run address-unit extraction over the request's address fields,
    /// returning the rewritten request. Idempotent.
    pub fn normalize_registration(&self, registration: PaRegistration) -> Result<PaRegistration> {
        Ok(apply_unit_extraction(
            registration,
            &self.constants()?.unit_vocabulary(),
        ))
    }

    /// Build the full submission body for a registration: normalize,
    /// validate/map, fill the template, wrap in the JSON envelope.
    pub fn submission_body(&self, registration: &PaRegistration) -> Result<String> {
        let registration = self.normalize_registration(registration.clone())?;
        let payload = build_payload(&registration, self.constants()?)?;
        let document = fill_template(self.template()?, &payload);
        Ok(wrap_submission(&document.to_xml()?))
    }

    /// Submit a voter registration.
    ///
    /// If the submission is rejected for an invalid access key, one
    /// confirmatory read-only call is issued: a key that still works
    /// read-only is reported as [`OvrError::ReadOnlyKey`] instead. The
    /// submission itself is never retried.
    pub fn register(&self, registration: &PaRegistration) -> Result<PaReceipt> {
        let body = self.submission_body(registration)?;
        debug!(bytes = body.len(), "submitting registration");

        let root = match self.do_request(action::SET_APPLICATION, Some(&body)) {
            Err(OvrError::AccessKey(message)) => {
                return match self.do_request(action::GET_ERROR_VALUES, None) {
                    Ok(_) => Err(OvrError::ReadOnlyKey(message)),
                    Err(_) => Err(OvrError::AccessKey(message)),
                };
            }
            other => other?,
        };
        extract_receipt(&root)
    }

    /// Fetch every county with its municipality list. One GETMUNICIPALITIES
    /// call per county.
    pub fn fetch_counties_and_municipalities(&self) -> Result<Vec<PaCounty>> {
        let constants = self.constants()?;
        let mut counties = Vec::new();
        for (name, id) in constants.county.iter() {
            let county_name = name.to_uppercase();
            let url = format!("{}&sysparm_County={county_name}", self.url_for(action::GET_MUNICIPALITIES));
            let root = self.do_request_url(action::GET_MUNICIPALITIES, &url, None)?;
            let mut municipalities = Vec::new();
            for node in &root.children {
                if node.name != "Municipality" {
                    continue;
                }
                // the API pads each list with a blank placeholder row
                if let (Some(municipality_id), Some(municipality_name)) = (
                    node.child_text("MunicipalityID"),
                    node.child_text("MunicipalityIDname"),
                ) {
                    municipalities.push(PaMunicipality {
                        municipality_id: municipality_id.to_string(),
                        municipality_name: municipality_name.to_string(),
                    });
                }
            }
            counties.push(PaCounty {
                county_id: id.to_string(),
                county_name,
                municipalities,
            });
        }
        Ok(counties)
    }

    fn do_request(&self, action: &str, body: Option<&str>) -> Result<Element> {
        let url = self.url_for(action);
        self.do_request_url(action, &url, body)
    }

    /// One call: dispatch, status check, outer JSON decode, XML parse, and
    /// remote-error classification for `RESPONSE` envelopes.
    fn do_request_url(&self, action: &str, url: &str, body: Option<&str>) -> Result<Element> {
        let method = if body.is_some() { Method::Post } else { Method::Get };
        let response = self.transport.send(method, url, body)?;
        debug!(action, status = response.status, "api call");
        if !response.is_success() {
            return Err(OvrError::HttpStatus {
                status: response.status,
            });
        }
        let xml = unwrap_reply(&response.body)?;
        let root = Element::parse(&xml)?;
        self.raise_errors(&root)?;
        Ok(root)
    }

    fn raise_errors(&self, root: &Element) -> Result<()> {
        let empty = BTreeMap::new();
        let error_text = self.constants.as_ref().map_or(&empty, |c| &c.error);
        raise_remote_errors(root, error_text)
    }
}

/// Run address-unit extraction over the request's address fields. Idempotent.
fn apply_unit_extraction(
    mut registration: PaRegistration,
    vocabulary: &UnitVocabulary,
) -> PaRegistration {
    let normalized = normalize_unit(
        Address {
            address1: Some(registration.address1.clone()),
            address2: registration.address2.clone(),
            unit_type: registration.unit_type.clone(),
            unit_number: registration.unit_number.clone(),
        },
        vocabulary,
    );
    registration.address1 = normalized.address1.unwrap_or_default();
    registration.address2 = normalized.address2;
    registration.unit_type = normalized.unit_type;
    registration.unit_number = normalized.unit_number;
    registration
}

impl<T: Transport> OvrAdapter for PaSession<T> {
    type Request = PaRegistration;
    type Receipt = PaReceipt;

    fn validate(&self, request: &PaRegistration) -> Result<()> {
        build_payload(request, self.constants()?).map(|_| ())
    }

    fn normalize(&self, request: PaRegistration) -> PaRegistration {
        // Before setup() the remote vocabulary is unknown; the built-in
        // default still extracts units from the address lines.
        let vocabulary = self
            .constants
            .as_ref()
            .map_or_else(UnitVocabulary::default, PaConstants::unit_vocabulary);
        apply_unit_extraction(request, &vocabulary)
    }

    fn serialize(&self, request: &PaRegistration) -> Result<String> {
        self.submission_body(request)
    }

    fn classify_response(&self, body: &str) -> Result<PaReceipt> {
        let xml = unwrap_reply(body)?;
        let root = Element::parse(&xml)?;
        self.raise_errors(&root)?;
        extract_receipt(&root)
    }
}

/// A county and its municipalities, from the per-county lookup action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaCounty {
    pub county_id: String,
    pub county_name: String,
    pub municipalities: Vec<PaMunicipality>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaMunicipality {
    pub municipality_id: String,
    pub municipality_name: String,
}
