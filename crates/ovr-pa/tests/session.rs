#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;

use ovr_model::{HttpResponse, Method, OvrAdapter, OvrError, Result, Transport};
use ovr_pa::{PaRegistration, PaSession};

const ERRORS_XML: &str = "<OVRLookupData>\
<MessageText><ErrorCode>VR_WAPI_InvalidAccessKey</ErrorCode>\
<ErrorText>Access Key is Invalid.</ErrorText></MessageText>\
<MessageText><ErrorCode>VR_WAPI_InvalidOVRDL</ErrorCode>\
<ErrorText>Please provide valid DL or PennDOT ID number.</ErrorText></MessageText>\
</OVRLookupData>";

const SETUP_XML: &str = "<NewDataSet>\
<Suffix><NameSuffixCode>XIV</NameSuffixCode><NameSuffixDescription>XIV</NameSuffixDescription></Suffix>\
<UnitTypes><UnitTypesCode>APT</UnitTypesCode><UnitTypesDescription>APARTMENT</UnitTypesDescription></UnitTypes>\
<Gender><GenderCode>F</GenderCode><GenderDescription>Female</GenderDescription></Gender>\
<PoliticalParty><PoliticalPartyCode>D</PoliticalPartyCode><PoliticalPartyDescription>Democratic</PoliticalPartyDescription></PoliticalParty>\
<PoliticalParty><PoliticalPartyCode>OTH</PoliticalPartyCode><PoliticalPartyDescription>Other</PoliticalPartyDescription></PoliticalParty>\
<County><countyID>2305</countyID><Countyname>CLARION</Countyname></County>\
<NextElection><NextElection>11/03/2026</NextElection></NextElection>\
<Text_OVRMailInApplnComplDate><Text_OVRMailInApplnComplDate>10/27/2026</Text_OVRMailInApplnComplDate></Text_OVRMailInApplnComplDate>\
<Text_OVRMailInApplnComplTime><Time>05:00 PM</Time></Text_OVRMailInApplnComplTime>\
</NewDataSet>";

const TEMPLATE_XML: &str = "<APIOnlineApplicationData xmlns=\"OVRexternaldata\">\
<record><batch></batch><FirstName></FirstName><MiddleName></MiddleName>\
<LastName></LastName><DateOfBirth></DateOfBirth><county></county>\
<politicalparty></politicalparty><drivers-license></drivers-license>\
<isnewregistration></isnewregistration></record></APIOnlineApplicationData>";

const SUCCESS_XML: &str = "<RESPONSE>\
<APPLICATIONID>100001</APPLICATIONID>\
<APPLICATIONDATE>11/22/2026</APPLICATIONDATE>\
<SIGNATURESOURCE>DriversLicense</SIGNATURESOURCE>\
</RESPONSE>";

/// Scripted transport: one response queue per `sysparm_action`. The last
/// entry in a queue is sticky so repeat calls keep answering.
#[derive(Default)]
struct MockTransport {
    responses: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
    calls: RefCell<Vec<(Method, String, Option<String>)>>,
}

impl MockTransport {
    fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 reply whose body is the JSON-encoded document.
    fn reply(&self, action: &str, xml: &str) {
        self.reply_status(action, 200, xml);
    }

    fn reply_status(&self, action: &str, status: u16, xml: &str) {
        let body = serde_json::to_string(xml).unwrap();
        self.responses
            .borrow_mut()
            .entry(action.to_string())
            .or_default()
            .push_back((status, body));
    }

    fn action_of(url: &str) -> String {
        url.split("sysparm_action=")
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .unwrap_or_default()
            .to_string()
    }

    fn actions(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, url, _)| Self::action_of(url))
            .collect()
    }

    fn last_call(&self) -> (Method, String, Option<String>) {
        self.calls.borrow().last().cloned().expect("at least one call")
    }
}

impl Transport for MockTransport {
    fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<HttpResponse> {
        self.calls
            .borrow_mut()
            .push((method, url.to_string(), body.map(String::from)));
        let action = Self::action_of(url);
        let mut responses = self.responses.borrow_mut();
        let queue = responses.get_mut(&action).ok_or_else(|| OvrError::Transport {
            message: format!("no scripted response for {action}"),
        })?;
        let (status, body) = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| OvrError::Transport {
                    message: format!("response queue for {action} is empty"),
                })?
        };
        Ok(HttpResponse { status, body })
    }
}

fn ready_transport() -> MockTransport {
    let transport = MockTransport::new();
    transport.reply("GETERRORVALUES", ERRORS_XML);
    transport.reply("GETAPPLICATIONSETUP", SETUP_XML);
    transport.reply("GETXMLTEMPLATE", TEMPLATE_XML);
    transport
}

fn ready_session(transport: &MockTransport) -> PaSession<&MockTransport> {
    let mut session = PaSession::new(transport, "secret", true);
    session.setup().expect("setup");
    session
}

fn sally() -> PaRegistration {
    PaRegistration {
        first_name: "Sally".to_string(),
        last_name: "Penndot".to_string(),
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
fn setup_fetches_tables_in_order() {
    let transport = ready_transport();
    let session = ready_session(&transport);

    assert_eq!(
        transport.actions(),
        ["GETERRORVALUES", "GETAPPLICATIONSETUP", "GETXMLTEMPLATE"]
    );
    for (method, url, body) in transport.calls.borrow().iter() {
        assert_eq!(*method, Method::Get);
        assert!(body.is_none());
        assert!(url.starts_with("https://paovrwebapi.beta.votespa.com/"));
        assert!(url.contains("?JSONv2&sysparm_AuthKey=secret&"));
        assert!(url.contains("&sysparm_Language=0"));
    }

    let constants = session.constants().expect("constants");
    assert_eq!(constants.error.len(), 2);
    assert_eq!(constants.county.code("Clarion"), Some("2305"));
    assert_eq!(constants.party.code("democratic"), Some("D"));
    assert_eq!(constants.unit_type.code("apartment"), Some("APT"));
}

#[test]
fn election_info_combines_date_and_time() {
    let transport = ready_transport();
    let session = ready_session(&transport);

    let info = session.election_info().expect("election info");
    assert_eq!(info.next_election.as_deref(), Some("11/03/2026"));
    assert_eq!(
        info.vbm_request_deadline,
        NaiveDate::from_ymd_opt(2026, 10, 27).unwrap().and_hms_opt(17, 0, 0)
    );
    assert_eq!(info.vbm_receipt_deadline, None);
}

#[test]
fn register_submits_filled_template() {
    let transport = ready_transport();
    transport.reply("SETAPPLICATION", SUCCESS_XML);
    let session = ready_session(&transport);

    let receipt = session.register(&sally()).expect("receipt");
    assert_eq!(receipt.application_id, "100001");
    assert_eq!(receipt.application_date, NaiveDate::from_ymd_opt(2026, 11, 22));
    assert_eq!(receipt.signature_source.as_deref(), Some("DriversLicense"));

    let (method, url, body) = transport.last_call();
    assert_eq!(method, Method::Post);
    assert!(url.contains("sysparm_action=SETAPPLICATION"));
    let envelope: serde_json::Value = serde_json::from_str(&body.expect("post body")).unwrap();
    assert_eq!(
        envelope["ApplicationData"],
        "<APIOnlineApplicationData xmlns=\"OVRexternaldata\">\
         <record><batch>0</batch><FirstName>Sally</FirstName><MiddleName/>\
         <LastName>Penndot</LastName><DateOfBirth>1944-05-02</DateOfBirth>\
         <county>2305</county><politicalparty>D</politicalparty>\
         <drivers-license>99007069</drivers-license>\
         <isnewregistration>1</isnewregistration></record>\
         </APIOnlineApplicationData>"
    );
}

#[test]
fn remote_errors_map_to_their_kinds() {
    let transport = ready_transport();
    transport.reply(
        "SETAPPLICATION",
        "<RESPONSE><ERROR>VR_WAPI_InvalidOVRDL</ERROR></RESPONSE>",
    );
    transport.reply(
        "SETAPPLICATION",
        "<RESPONSE><ERROR>VR_WAPI_Invalidsignaturecontrast</ERROR></RESPONSE>",
    );
    transport.reply(
        "SETAPPLICATION",
        "<RESPONSE><ERROR>VR_WAPI_MailinNotEligible</ERROR></RESPONSE>",
    );
    let session = ready_session(&transport);

    match session.register(&sally()) {
        Err(OvrError::DriverLicense(message)) => {
            // message carries the fetched human text
            assert_eq!(
                message,
                "VR_WAPI_InvalidOVRDL: Please provide valid DL or PennDOT ID number."
            );
        }
        other => panic!("expected driver's-license error, got {other:?}"),
    }

    match session.register(&sally()) {
        // code missing from the error table: reported bare
        Err(OvrError::Signature(message)) => {
            assert_eq!(message, "VR_WAPI_Invalidsignaturecontrast");
        }
        other => panic!("expected signature error, got {other:?}"),
    }

    match session.register(&sally()) {
        Err(OvrError::Rejected(message)) => {
            assert_eq!(message, "VR_WAPI_MailinNotEligible");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn invalid_key_on_write_probes_read_access() {
    let transport = ready_transport();
    transport.reply(
        "SETAPPLICATION",
        "<RESPONSE><ERROR>VR_WAPI_InvalidAccessKey</ERROR></RESPONSE>",
    );
    let session = ready_session(&transport);

    // read calls still succeed, so the key is read-only
    match session.register(&sally()) {
        Err(OvrError::ReadOnlyKey(message)) => {
            assert_eq!(message, "VR_WAPI_InvalidAccessKey: Access Key is Invalid.");
        }
        other => panic!("expected read-only-key error, got {other:?}"),
    }

    // exactly one confirmatory probe, no submission retry
    assert_eq!(
        transport.actions(),
        [
            "GETERRORVALUES",
            "GETAPPLICATIONSETUP",
            "GETXMLTEMPLATE",
            "SETAPPLICATION",
            "GETERRORVALUES",
        ]
    );
}

#[test]
fn invalid_key_stands_when_probe_also_fails() {
    let transport = ready_transport();
    // the setup fetch consumes the good reply; the probe hits the 403
    transport.reply_status("GETERRORVALUES", 403, "");
    transport.reply(
        "SETAPPLICATION",
        "<RESPONSE><ERROR>VR_WAPI_InvalidAccessKey</ERROR></RESPONSE>",
    );
    let session = ready_session(&transport);

    match session.register(&sally()) {
        Err(OvrError::AccessKey(message)) => {
            assert_eq!(message, "VR_WAPI_InvalidAccessKey: Access Key is Invalid.");
        }
        other => panic!("expected access-key error, got {other:?}"),
    }
}

#[test]
fn validation_fails_before_any_network_call() {
    let transport = ready_transport();
    let session = ready_session(&transport);

    let mut registration = sally();
    registration.county = "Narnia".to_string();
    match session.register(&registration) {
        Err(OvrError::Validation { field, .. }) => assert_eq!(field, "county"),
        other => panic!("expected validation error, got {other:?}"),
    }
    // only the three setup calls went out
    assert_eq!(transport.calls.borrow().len(), 3);
}

#[test]
fn response_without_application_id_is_rejected() {
    let transport = ready_transport();
    transport.reply(
        "SETAPPLICATION",
        "<RESPONSE><APPLICATIONID></APPLICATIONID><APPLICATIONDATE></APPLICATIONDATE></RESPONSE>",
    );
    let session = ready_session(&transport);

    match session.register(&sally()) {
        Err(OvrError::Rejected(message)) => {
            assert!(message.contains("no application id"), "message: {message}");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn non_success_status_is_an_error() {
    let transport = MockTransport::new();
    transport.reply_status("GETERRORVALUES", 500, "");
    let mut session = PaSession::new(&transport, "secret", true);

    match session.setup() {
        Err(OvrError::HttpStatus { status }) => assert_eq!(status, 500),
        other => panic!("expected HTTP status error, got {other:?}"),
    }
}

#[test]
fn calls_before_setup_are_not_ready() {
    let transport = MockTransport::new();
    let session = PaSession::new(&transport, "secret", true);

    assert!(matches!(session.election_info(), Err(OvrError::NotReady(_))));
    assert!(matches!(session.register(&sally()), Err(OvrError::NotReady(_))));
    assert!(transport.calls.borrow().is_empty());
}

#[test]
fn normalize_before_setup_uses_builtin_vocabulary() {
    let transport = MockTransport::new();
    let session = PaSession::new(&transport, "secret", true);

    let mut registration = sally();
    registration.address1 = "123 A St apt 7".to_string();
    let normalized = session.normalize(registration);

    assert_eq!(normalized.address1, "123 A St");
    assert_eq!(normalized.unit_type.as_deref(), Some("APT"));
    assert_eq!(normalized.unit_number.as_deref(), Some("7"));
    assert!(transport.calls.borrow().is_empty());
}

#[test]
fn municipalities_fetched_per_county() {
    let transport = ready_transport();
    transport.reply(
        "GETMUNICIPALITIES",
        "<NewDataSet>\
         <Municipality><MunicipalityID>CL1</MunicipalityID>\
         <MunicipalityIDname>ASHLAND TOWNSHIP</MunicipalityIDname></Municipality>\
         <Municipality><MunicipalityID></MunicipalityID>\
         <MunicipalityIDname></MunicipalityIDname></Municipality>\
         </NewDataSet>",
    );
    let session = ready_session(&transport);

    let counties = session.fetch_counties_and_municipalities().expect("counties");
    assert_eq!(counties.len(), 1);
    assert_eq!(counties[0].county_name, "CLARION");
    assert_eq!(counties[0].county_id, "2305");
    // the blank placeholder row is dropped
    assert_eq!(counties[0].municipalities.len(), 1);
    assert_eq!(counties[0].municipalities[0].municipality_id, "CL1");
    assert_eq!(counties[0].municipalities[0].municipality_name, "ASHLAND TOWNSHIP");

    let (_, url, _) = transport.last_call();
    assert!(url.contains("sysparm_action=GETMUNICIPALITIES"));
    assert!(url.ends_with("&sysparm_County=CLARION"));
}
