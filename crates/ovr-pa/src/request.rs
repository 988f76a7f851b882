//! Typed registration request.
//!
//! Required fields are plain `String`s validated for non-emptiness at
//! payload-build time; everything optional is an `Option`. This replaces the
//! string-keyed maps that early clients passed around, so an unknown field
//! is a compile error rather than a runtime rejection.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;

use ovr_model::OvrError;

/// One voter-registration submission attempt.
///
/// Constructed by the caller, run once through address normalization, then
/// consumed read-only by payload building and serialization.
#[derive(Debug, Clone, Default)]
pub struct PaRegistration {
    // identity
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub date_of_birth: NaiveDate,

    // residential address
    pub address1: String,
    pub address2: Option<String>,
    pub unit_type: Option<String>,
    pub unit_number: Option<String>,
    pub city: String,
    pub county: String,
    pub zipcode: String,

    // demographics / contact
    pub party: String,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dl_number: Option<String>,
    pub ssn4: Option<String>,
    pub federal_voter: Option<bool>,

    // prior registration, for update submissions
    pub previous_first_name: Option<String>,
    pub previous_middle_name: Option<String>,
    pub previous_last_name: Option<String>,
    pub previous_address: Option<String>,
    pub previous_city: Option<String>,
    pub previous_state: Option<String>,
    pub previous_zipcode: Option<String>,
    pub previous_county: Option<String>,
    pub previous_year: Option<String>,

    // mailing address
    pub mailing_address: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_zipcode: Option<String>,

    // vote-by-mail
    pub mailin_ballot_request: Option<bool>,
    pub mailin_ballot_address_type: Option<MailinAddressType>,
    pub mailin_ballot_address: Option<String>,
    pub mailin_ballot_city: Option<String>,
    pub mailin_ballot_state: Option<String>,
    pub mailin_ballot_zipcode: Option<String>,

    // declarations
    pub united_states_citizen: bool,
    pub eighteen_on_election_day: bool,
    pub declaration: bool,

    /// Explicit new/not-new flag. When `None` the kind is inferred from the
    /// prior-registration fields.
    pub is_new: Option<bool>,

    pub signature: Option<Signature>,
}

/// Where a requested mail-in ballot should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailinAddressType {
    Residential,
    Mailing,
    Alternate,
}

impl MailinAddressType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Residential => "R",
            Self::Mailing => "M",
            Self::Alternate => "A",
        }
    }
}

/// Accepted signature image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    Tiff,
    Png,
    Jpg,
    Bmp,
}

impl FromStr for SignatureFormat {
    type Err = OvrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiff" => Ok(Self::Tiff),
            "png" => Ok(Self::Png),
            // jpeg is normalized to jpg
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "bmp" => Ok(Self::Bmp),
            other => Err(OvrError::validation(
                "signature",
                format!("format {other:?} must be one of tiff, png, jpg, bmp"),
            )),
        }
    }
}

impl fmt::Display for SignatureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tiff => "tiff",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Bmp => "bmp",
        };
        f.write_str(name)
    }
}

/// A signature image and its declared format.
///
/// The bytes stay opaque until payload building, when they are framed as a
/// base64 data URI.
#[derive(Debug, Clone)]
pub struct Signature {
    pub data: Vec<u8>,
    pub format: SignatureFormat,
}

impl Signature {
    pub fn new(data: Vec<u8>, format: SignatureFormat) -> Self {
        Self { data, format }
    }

    /// Encode as `data:image/<fmt>;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/{};base64,{}", self.format, BASE64.encode(&self.data))
    }
}
