//! SNOMED CT Description file parser.
//!
//! Parses sct2_Description_Snapshot*.txt RF2 files.

use csv::StringRecord;
use snomed_types::Rf2Description;

use crate::parser::{check_arity, parse, Rf2Record};
use crate::types::Rf2Result;

/// Expected columns in a description file.
const DESCRIPTION_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "conceptId",
    "languageCode",
    "typeId",
    "term",
    "caseSignificanceId",
];

impl Rf2Record for Rf2Description {
    const EXPECTED_COLUMNS: &'static [&'static str] = DESCRIPTION_COLUMNS;

    fn from_record(record: &StringRecord) -> Rf2Result<Self> {
        check_arity::<Self>(record)?;
        Ok(Rf2Description {
            id: parse::sctid(record.get(0).unwrap_or(""))?,
            effective_time: parse::effective_time(record.get(1).unwrap_or(""))?,
            active: parse::boolean(record.get(2).unwrap_or(""))?,
            module_id: parse::sctid(record.get(3).unwrap_or(""))?,
            concept_id: parse::sctid(record.get(4).unwrap_or(""))?,
            language_code: record.get(5).unwrap_or("").to_string(),
            type_id: parse::sctid(record.get(6).unwrap_or(""))?,
            term: record.get(7).unwrap_or("").to_string(),
            case_significance_id: parse::sctid(record.get(8).unwrap_or(""))?,
        })
    }
}
