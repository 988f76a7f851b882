//! Setup-call code tables.
//!
//! The PA API publishes its enumerations (counties, parties, genders, unit
//! types, ...), its error vocabulary, and a handful of election-info leaves
//! through two read-only actions. [`PaConstants`] ingests those documents
//! once per session and is read-only afterwards.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use ovr_address::UnitVocabulary;
use ovr_model::{CodeTable, OvrError, Result};

use crate::document::Element;

/// Election-info keys carried in the `other` map: setup tag -> (inner value
/// tag, our key). The API nests each value under an idiosyncratic child tag.
const ELECTION_LEAVES: &[(&str, &str, &str)] = &[
    ("NextElection", "NextElection", "next_election"),
    ("NextVRDeadline", "NextVRDeadline", "next_vr_deadline"),
    ("Text_OVRApplnDeclaration", "Text", "vr_declaration"),
    (
        "Text_OVRMailInApplnDeclaration",
        "Text",
        "vbm_request_declaration",
    ),
    (
        "Text_OVRMailInApplnComplDate",
        "Text_OVRMailInApplnComplDate",
        "vbm_request_date",
    ),
    (
        "Text_OVRMailInBallotRecvdDate",
        "Text_OVRMailInBallotRecvdDate",
        "vbm_receipt_date",
    ),
    ("Text_OVRMailInElectionName", "ElectionName", "vbm_election_name"),
    ("Text_OVRMailInApplnComplTime", "Time", "vbm_request_time"),
    ("Text_OVRMailInBallotRecvdTime", "RecvdTime", "vbm_receipt_time"),
];

/// The code tables and templates a session needs to build and classify
/// submissions. Immutable once populated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaConstants {
    /// Remote error code -> human-readable text.
    pub error: BTreeMap<String, String>,
    pub suffix: CodeTable,
    pub race: CodeTable,
    pub unit_type: CodeTable,
    pub assistance_type: CodeTable,
    pub gender: CodeTable,
    pub party: CodeTable,
    pub county: CodeTable,
    pub state: CodeTable,
    pub mailin_address_type: CodeTable,
    /// Election-info text and date leaves, keyed per [`ELECTION_LEAVES`].
    pub other: BTreeMap<String, String>,
}

impl PaConstants {
    /// Ingest a GETERRORVALUES document (`OVRLookupData` root with
    /// `MessageText` children).
    pub fn apply_error_values(&mut self, root: &Element) {
        for node in &root.children {
            if node.name != "MessageText" {
                continue;
            }
            if let (Some(code), Some(text)) =
                (node.child_text("ErrorCode"), node.child_text("ErrorText"))
            {
                self.error.insert(code.to_string(), text.to_string());
            }
        }
    }

    /// Ingest a GETAPPLICATIONSETUP document.
    ///
    /// # Errors
    ///
    /// Fails with [`OvrError::Malformed`] when the root is not the expected
    /// `NewDataSet` envelope.
    pub fn apply_setup(&mut self, root: &Element) -> Result<()> {
        if root.name != "NewDataSet" {
            return Err(OvrError::Malformed(format!(
                "expected NewDataSet setup document, got {}",
                root.name
            )));
        }
        for node in &root.children {
            match node.name.as_str() {
                "Suffix" => {
                    insert_pair(&mut self.suffix, node, "NameSuffixDescription", "NameSuffixCode");
                }
                "Race" => insert_pair(&mut self.race, node, "RaceDescription", "RaceCode"),
                "UnitTypes" => {
                    insert_pair(&mut self.unit_type, node, "UnitTypesDescription", "UnitTypesCode");
                }
                "AssistanceType" => {
                    insert_pair(
                        &mut self.assistance_type,
                        node,
                        "AssistanceTypeDescription",
                        "AssistanceTypeCode",
                    );
                }
                "Gender" => insert_pair(&mut self.gender, node, "GenderDescription", "GenderCode"),
                "PoliticalParty" => {
                    insert_pair(
                        &mut self.party,
                        node,
                        "PoliticalPartyDescription",
                        "PoliticalPartyCode",
                    );
                }
                "County" => insert_pair(&mut self.county, node, "Countyname", "countyID"),
                "States" => insert_pair(&mut self.state, node, "CodesDescription", "Code"),
                "MailinAddressTypes" => {
                    insert_pair(
                        &mut self.mailin_address_type,
                        node,
                        "MailinAddressTypesDescription",
                        "MailinAddressTypesCode",
                    );
                }
                other => {
                    if let Some((_, value_tag, key)) =
                        ELECTION_LEAVES.iter().find(|(tag, _, _)| *tag == other)
                        && let Some(value) = node.child_text(value_tag)
                    {
                        self.other.insert((*key).to_string(), value.to_string());
                    }
                    // unknown sections are ignored; the API adds them freely
                }
            }
        }
        Ok(())
    }

    /// The unit-type vocabulary for address normalization: the fetched table
    /// when present, the built-in default otherwise.
    pub fn unit_vocabulary(&self) -> UnitVocabulary {
        if self.unit_type.is_empty() {
            UnitVocabulary::default()
        } else {
            UnitVocabulary::new(self.unit_type.clone())
        }
    }

    /// Shape the election-info leaves into a typed value.
    pub fn election_info(&self) -> PaElectionInfo {
        PaElectionInfo {
            next_election: self.other.get("next_election").cloned(),
            next_vr_deadline: self.other.get("next_vr_deadline").cloned(),
            vr_declaration: self.other.get("vr_declaration").cloned(),
            vbm_election_name: self.other.get("vbm_election_name").cloned(),
            vbm_request_declaration: self.other.get("vbm_request_declaration").cloned(),
            vbm_request_deadline: self.deadline("vbm_request_date", "vbm_request_time"),
            vbm_receipt_deadline: self.deadline("vbm_receipt_date", "vbm_receipt_time"),
        }
    }

    /// Combine a `%m/%d/%Y` date leaf and a `%I:%M %p` time leaf.
    fn deadline(&self, date_key: &str, time_key: &str) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.other.get(date_key)?, "%m/%d/%Y").ok()?;
        let time = NaiveTime::parse_from_str(self.other.get(time_key)?, "%I:%M %p").ok()?;
        Some(date.and_time(time))
    }
}

/// Upcoming election dates and declaration texts from the setup tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaElectionInfo {
    pub next_election: Option<String>,
    pub next_vr_deadline: Option<String>,
    pub vr_declaration: Option<String>,
    pub vbm_election_name: Option<String>,
    pub vbm_request_declaration: Option<String>,
    pub vbm_request_deadline: Option<NaiveDateTime>,
    pub vbm_receipt_deadline: Option<NaiveDateTime>,
}

/// Insert one key/value row, skipping blank placeholder rows (the API emits
/// an all-empty first row in several tables).
fn insert_pair(table: &mut CodeTable, node: &Element, key_tag: &str, value_tag: &str) {
    if let (Some(key), Some(value)) = (node.child_text(key_tag), node.child_text(value_tag)) {
        table.insert(key, value);
    }
}
