//! Reply classification.
//!
//! The API reports failure as an `ERROR` child of a `RESPONSE` envelope
//! carrying one of a fixed set of `VR_WAPI_*` codes. The codes are a closed
//! enumeration here; anything unrecognized falls through to the catch-all
//! rejection with the looked-up human text attached.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use ovr_model::{OvrError, Result};

use crate::document::Element;

/// Known remote error codes, mapped onto the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCode {
    InvalidAccessKey,
    InvalidDriverLicense,
    InvalidSignatureString,
    InvalidSignatureType,
    InvalidSignatureSize,
    InvalidSignatureDimension,
    InvalidSignatureContrast,
    InvalidSignatureResolution,
    /// Any other non-empty error code.
    Other,
}

impl RemoteErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "VR_WAPI_InvalidAccessKey" => Self::InvalidAccessKey,
            "VR_WAPI_InvalidOVRDL" => Self::InvalidDriverLicense,
            "VR_WAPI_Invalidsignaturestring" => Self::InvalidSignatureString,
            "VR_WAPI_Invalidsignaturetype" => Self::InvalidSignatureType,
            "VR_WAPI_Invalidsignaturesize" => Self::InvalidSignatureSize,
            "VR_WAPI_Invalidsignaturedimension" => Self::InvalidSignatureDimension,
            "VR_WAPI_Invalidsignaturecontrast" => Self::InvalidSignatureContrast,
            "VR_WAPI_Invalidsignatureresolution" => Self::InvalidSignatureResolution,
            _ => Self::Other,
        }
    }

    fn is_signature(self) -> bool {
        matches!(
            self,
            Self::InvalidSignatureString
                | Self::InvalidSignatureType
                | Self::InvalidSignatureSize
                | Self::InvalidSignatureDimension
                | Self::InvalidSignatureContrast
                | Self::InvalidSignatureResolution
        )
    }
}

/// Scan a `RESPONSE` envelope for `ERROR` children and raise the first one
/// as its typed kind. Documents with a different root pass through.
pub fn raise_remote_errors(root: &Element, error_text: &BTreeMap<String, String>) -> Result<()> {
    if root.name != "RESPONSE" {
        return Ok(());
    }
    for node in &root.children {
        if node.name != "ERROR" {
            continue;
        }
        let Some(code) = node.text.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        let message = match error_text.get(code) {
            Some(text) => format!("{code}: {text}"),
            None => code.to_string(),
        };
        let kind = RemoteErrorCode::parse(code);
        return Err(match kind {
            RemoteErrorCode::InvalidAccessKey => OvrError::AccessKey(message),
            RemoteErrorCode::InvalidDriverLicense => OvrError::DriverLicense(message),
            _ if kind.is_signature() => OvrError::Signature(message),
            _ => OvrError::Rejected(message),
        });
    }
    Ok(())
}

/// What a successful submission yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaReceipt {
    pub application_id: String,
    pub application_date: Option<NaiveDate>,
    /// Echo of where the signature on file came from, when the API reports
    /// one.
    pub signature_source: Option<String>,
}

/// Extract the receipt from an already error-checked `RESPONSE` envelope.
///
/// A response with neither an error nor an application id is the API's
/// silent-failure mode and is reported as a rejection.
pub fn extract_receipt(root: &Element) -> Result<PaReceipt> {
    if root.name != "RESPONSE" {
        return Err(OvrError::Malformed(format!(
            "expected RESPONSE envelope, got {}",
            root.name
        )));
    }
    let Some(application_id) = root.child_text("APPLICATIONID") else {
        return Err(OvrError::Rejected(
            "incomplete registration: no application id in response".to_string(),
        ));
    };
    let application_date = root
        .child_text("APPLICATIONDATE")
        .and_then(|text| NaiveDate::parse_from_str(text, "%m/%d/%Y").ok());
    Ok(PaReceipt {
        application_id: application_id.to_string(),
        application_date,
        signature_source: root.child_text("SIGNATURESOURCE").map(String::from),
    })
}
