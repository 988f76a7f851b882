//! Address-unit extraction.
//!
//! Registrants frequently write the unit into the street address lines
//! ("123 A st #456", address2 = "apt. 456") even though the registration
//! APIs want a dedicated unit type + unit number pair. [`normalize_unit`]
//! extracts that pair by trying a fixed sequence of patterns against
//! `address2` and then the tail of `address1`.

use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::UnitVocabulary;

/// address2 is nothing but a unit number, optionally "#"-prefixed.
static BARE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(\d+)$").unwrap());

/// address2 is "<word>[.] <number>".
static WORD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\.? (\d+)$").unwrap());

/// address1 ends in " #<number>".
static TRAILING_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) #(\d+)$").unwrap());

/// address1 ends in " <word>[.] <number>".
static TRAILING_WORD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) (\w+)\.? (\d+)$").unwrap());

/// The address fields subject to unit extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub unit_type: Option<String>,
    pub unit_number: Option<String>,
}

/// Move a unit found in the address lines into the dedicated
/// `unit_type`/`unit_number` fields, returning the rewritten address.
///
/// If either unit field is already populated the input is returned
/// unchanged, so the function is idempotent. Exactly one rule fires, in
/// this order:
///
/// 1. `address2` is a bare number (`"456"`, `"#456"`) → `UNIT`/number,
///    `address2` cleared.
/// 2. `address2` is `"<word>[.] <number>"` where `<word>` is a known
///    unit-type name (→ its code) or already a code (→ uppercased);
///    `address2` cleared.
/// 3. `address1` ends in `" #<number>"` → `UNIT`/number, suffix stripped.
/// 4. `address1` ends in `" <word>[.] <number>"`, resolved as in rule 2,
///    `address1` rewritten to the prefix.
///
/// No pattern matching is not an error: the fields are simply left unset.
pub fn normalize_unit(mut addr: Address, vocab: &UnitVocabulary) -> Address {
    if addr.unit_type.is_some() || addr.unit_number.is_some() {
        return addr;
    }

    if let Some(address2) = addr.address2.as_deref().map(str::trim) {
        if let Some(caps) = BARE_NUMBER_RE.captures(address2) {
            addr.unit_type = Some("UNIT".to_string());
            addr.unit_number = Some(caps[1].to_string());
            addr.address2 = None;
            return addr;
        }
        if let Some(caps) = WORD_NUMBER_RE.captures(address2)
            && let Some(resolved) = resolve_unit_type(&caps[1], vocab)
        {
            addr.unit_type = Some(resolved);
            addr.unit_number = Some(caps[2].to_string());
            addr.address2 = None;
            return addr;
        }
    }

    if let Some(address1) = addr.address1.as_deref().map(|s| s.trim().to_string()) {
        if let Some(caps) = TRAILING_HASH_RE.captures(&address1) {
            addr.address1 = Some(caps[1].trim().to_string());
            addr.unit_type = Some("UNIT".to_string());
            addr.unit_number = Some(caps[2].to_string());
            return addr;
        }
        if let Some(caps) = TRAILING_WORD_NUMBER_RE.captures(&address1)
            && let Some(resolved) = resolve_unit_type(&caps[2], vocab)
        {
            addr.address1 = Some(caps[1].to_string());
            addr.unit_type = Some(resolved);
            addr.unit_number = Some(caps[3].to_string());
            return addr;
        }
    }

    addr
}

/// A word names a unit type (→ canonical code) or is itself a code
/// (→ uppercased). Anything else does not resolve.
fn resolve_unit_type(word: &str, vocab: &UnitVocabulary) -> Option<String> {
    if let Some(code) = vocab.code_for_name(word) {
        return Some(code.to_string());
    }
    if vocab.is_code(word) {
        return Some(word.to_uppercase());
    }
    None
}
