//! Errors advancing the finite-state machine.

use alloc::string::String;

use thiserror::Error;

use super::representation::DecodeError;

/// A violation of the component grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("missing leading set")]
    MissingLeadingSet,
    #[error("set without type")]
    SetWithoutType,
    #[error("multiple sets in one EFLR")]
    MultipleSets,
    #[error("template column without label")]
    ColumnWithoutLabel,
    #[error("object without name")]
    ObjectWithoutName,
    #[error("absent outside object")]
    AbsentOutsideObject,
    #[error("attribute overflow")]
    AttributeOverflow,
    #[error("invariant attribute redefined")]
    InvariantRedefined,
}

/// An error decoding an EFLR body.
///
/// None of these are recoverable for the record being decoded; callers
/// usually note the failure and continue with the next logical record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The components break the EFLR grammar.
    #[error("Malformed record: {0}.")]
    MalformedRecord(#[from] Malformed),
    /// A redundant set names a different set than the one it continues.
    #[error("Redundant set {found:?} does not match the open set {open:?}.")]
    InconsistentRedundantSet {
        open: (String, String),
        found: (String, String),
    },
    /// The body ended inside a component.
    #[error("Record ended inside the {subfield} of an {role} component.")]
    TruncatedRecord {
        role: &'static str,
        subfield: &'static str,
    },
    /// A subfield could not be decoded.
    #[error("Could not decode the {subfield} of an {role} component: {source}")]
    Decode {
        role: &'static str,
        subfield: &'static str,
        source: DecodeError,
    },
    /// Decoding was cancelled between components.
    #[error("Decoding was cancelled.")]
    Cancelled,
}

impl Error {
    pub(crate) fn subfield(role: &'static str, subfield: &'static str, err: DecodeError) -> Self {
        match err {
            DecodeError::Truncated { .. } => Self::TruncatedRecord { role, subfield },
            source => Self::Decode {
                role,
                subfield,
                source,
            },
        }
    }
}
