//! SNOMED CT Relationship file parser.
//!
//! Parses sct2_Relationship_Snapshot*.txt RF2 files.

use csv::StringRecord;
use snomed_types::Rf2Relationship;

use crate::parser::{check_arity, parse, Rf2Record};
use crate::types::Rf2Result;

/// Expected columns in a relationship file.
const RELATIONSHIP_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "sourceId",
    "destinationId",
    "relationshipGroup",
    "typeId",
    "characteristicTypeId",
    "modifierId",
];

impl Rf2Record for Rf2Relationship {
    const EXPECTED_COLUMNS: &'static [&'static str] = RELATIONSHIP_COLUMNS;

    fn from_record(record: &StringRecord) -> Rf2Result<Self> {
        check_arity::<Self>(record)?;
        Ok(Rf2Relationship {
            id: parse::sctid(record.get(0).unwrap_or(""))?,
            effective_time: parse::effective_time(record.get(1).unwrap_or(""))?,
            active: parse::boolean(record.get(2).unwrap_or(""))?,
            module_id: parse::sctid(record.get(3).unwrap_or(""))?,
            source_id: parse::sctid(record.get(4).unwrap_or(""))?,
            destination_id: parse::sctid(record.get(5).unwrap_or(""))?,
            // Malformed relationshipGroup never drops the row: defaults to
            // ungrouped (0) instead.
            relationship_group: parse::integer_or(record.get(6).unwrap_or(""), 0u16),
            type_id: parse::sctid(record.get(7).unwrap_or(""))?,
            characteristic_type_id: parse::sctid(record.get(8).unwrap_or(""))?,
            modifier_id: parse::sctid(record.get(9).unwrap_or(""))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rf2Error;

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_relationship_record() {
        let record = make_record(&[
            "100000028",
            "20020131",
            "1",
            "900000000000207008",
            "73211009",
            "362969004",
            "0",
            "116680003",
            "900000000000011006",
            "900000000000451002",
        ]);

        let rel = Rf2Relationship::from_record(&record).unwrap();
        assert_eq!(rel.id, 100000028);
        assert_eq!(rel.source_id, 73211009);
        assert_eq!(rel.destination_id, 362969004);
        assert_eq!(rel.relationship_group, 0);
        assert!(rel.is_is_a());
        assert!(rel.is_inferred());
    }

    #[test]
    fn test_malformed_relationship_group_defaults_to_zero() {
        let record = make_record(&[
            "100000028",
            "20020131",
            "1",
            "900000000000207008",
            "73211009",
            "362969004",
            "not-a-number",
            "116680003",
            "900000000000011006",
            "900000000000451002",
        ]);

        let rel = Rf2Relationship::from_record(&record).unwrap();
        assert_eq!(rel.relationship_group, 0);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let record = make_record(&["100000028", "20020131", "1"]);
        let err = Rf2Relationship::from_record(&record).unwrap_err();
        assert!(matches!(err, Rf2Error::TooFewColumns { .. }));
    }
}
