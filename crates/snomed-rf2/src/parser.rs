//! RF2 record trait and field-level parsing helpers.

use csv::StringRecord;
use snomed_types::SctId;

use crate::types::{Rf2Error, Rf2Result};

/// A type parseable from one row of an RF2 tab-delimited file.
///
/// Implementors validate column arity themselves (the reader is
/// configured with `flexible(true)` so a short row reaches
/// `from_record` rather than erroring inside the `csv` crate) and
/// return [`Rf2Error::TooFewColumns`] for rows with fewer fields than
/// `EXPECTED_COLUMNS`. Any other `Err` return also marks the row
/// malformed; the streaming layer drops it rather than propagating the
/// error to callers.
pub trait Rf2Record: Sized {
    /// Expected column names, in order, for this record type.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parse one record. Returns `Err` for a malformed row.
    fn from_record(record: &StringRecord) -> Rf2Result<Self>;
}

/// Validates that `record` has at least `T::EXPECTED_COLUMNS.len()` fields.
pub(crate) fn check_arity<T: Rf2Record>(record: &StringRecord) -> Rf2Result<()> {
    let expected = T::EXPECTED_COLUMNS.len();
    if record.len() < expected {
        return Err(Rf2Error::TooFewColumns {
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

/// Helper functions for parsing RF2 field values.
pub mod parse {
    use super::{Rf2Error, Rf2Result, SctId};

    /// Parses an SCTID from a string.
    pub fn sctid(value: &str) -> Rf2Result<SctId> {
        value.parse::<u64>().map_err(|_| Rf2Error::InvalidSctId {
            value: value.to_string(),
        })
    }

    /// Parses a boolean from "0" or "1".
    pub fn boolean(value: &str) -> Rf2Result<bool> {
        match value {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(Rf2Error::InvalidBoolean {
                value: value.to_string(),
            }),
        }
    }

    /// Parses an effective time (YYYYMMDD) as u32.
    pub fn effective_time(value: &str) -> Rf2Result<u32> {
        if value.len() != 8 {
            return Err(Rf2Error::InvalidDate {
                value: value.to_string(),
            });
        }
        value.parse::<u32>().map_err(|_| Rf2Error::InvalidDate {
            value: value.to_string(),
        })
    }

    /// Parses an integer value, defaulting to `default` on parse failure
    /// rather than failing the whole row (used for `relationshipGroup`).
    pub fn integer_or<T: std::str::FromStr>(value: &str, default: T) -> T {
        value.parse::<T>().unwrap_or(default)
    }
}
