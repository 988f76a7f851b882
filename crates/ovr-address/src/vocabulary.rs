//! Unit-type vocabulary.

use ovr_model::CodeTable;

/// Unit-type names and codes as exposed by the Pennsylvania setup tables.
/// Used as the built-in default when a session has not fetched its own.
const DEFAULT_UNIT_TYPES: &[(&str, &str)] = &[
    ("apartment", "APT"),
    ("basement", "BSM"),
    ("box #", "BOX"),
    ("building", "BLD"),
    ("cabin", "CBN"),
    ("department", "DEP"),
    ("floor", "FL"),
    ("front", "FRN"),
    ("hanger", "HNG"),
    ("hub", "HUB"),
    ("lobby", "LBB"),
    ("lot", "LOT"),
    ("lower", "LOW"),
    ("office", "OFC"),
    ("penthouse", "PH"),
    ("pier", "PIE"),
    ("poll", "POL"),
    ("rear", "REA"),
    ("room", "RM"),
    ("side", "SID"),
    ("slip", "SLI"),
    ("space", "SPC"),
    ("stop", "STO"),
    ("student mailing center", "SMC"),
    ("suite", "STE"),
    ("townhouse", "TH"),
    ("trailer", "TRL"),
    ("trailer", "TRLR"),
    ("unit", "UNI"),
    ("upper", "UPP"),
];

/// The unit-type name ↔ code table used during extraction.
///
/// A name resolves to its canonical 2–4 letter code; a string that is
/// already one of the codes is accepted directly (uppercased).
#[derive(Debug, Clone)]
pub struct UnitVocabulary {
    table: CodeTable,
}

impl UnitVocabulary {
    /// Build a vocabulary from an already-populated code table, e.g. the
    /// `UnitTypes` rows of a setup response.
    pub fn new(table: CodeTable) -> Self {
        Self { table }
    }

    /// Resolve a unit-type name (case-insensitive) to its code.
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        self.table.code(name)
    }

    /// True when `word` (case-insensitive) is already a canonical code.
    pub fn is_code(&self, word: &str) -> bool {
        self.table.contains_code(word)
    }
}

impl Default for UnitVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_TYPES.iter().copied().collect())
    }
}
