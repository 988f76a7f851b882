//! Address-unit normalization.
//!
//! See [`normalize_unit`] for the extraction contract and
//! [`UnitVocabulary`] for the unit-type name ↔ code table it consults.

pub mod normalize;
pub mod vocabulary;

pub use normalize::{Address, normalize_unit};
pub use vocabulary::UnitVocabulary;
