//! RF2 Language Reference Set parser.

use csv::StringRecord;
use snomed_types::Rf2LanguageRefsetMember;

use crate::parser::{check_arity, parse, Rf2Record};
use crate::types::Rf2Result;

/// Expected columns for language reference set files.
const LANGUAGE_REFSET_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "refsetId",
    "referencedComponentId",
    "acceptabilityId",
];

impl Rf2Record for Rf2LanguageRefsetMember {
    const EXPECTED_COLUMNS: &'static [&'static str] = LANGUAGE_REFSET_COLUMNS;

    fn from_record(record: &StringRecord) -> Rf2Result<Self> {
        check_arity::<Self>(record)?;
        Ok(Self {
            id: parse::sctid(record.get(0).unwrap_or(""))?,
            effective_time: parse::effective_time(record.get(1).unwrap_or(""))?,
            active: parse::boolean(record.get(2).unwrap_or(""))?,
            module_id: parse::sctid(record.get(3).unwrap_or(""))?,
            refset_id: parse::sctid(record.get(4).unwrap_or(""))?,
            referenced_component_id: parse::sctid(record.get(5).unwrap_or(""))?,
            acceptability_id: parse::sctid(record.get(6).unwrap_or(""))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rf2Error;

    #[test]
    fn test_parse_language_refset_member() {
        let record = StringRecord::from(vec![
            "12345678901",
            "20200101",
            "1",
            "900000000000207008",
            "900000000000509007",
            "12345678",
            "900000000000548007",
        ]);

        let member = Rf2LanguageRefsetMember::from_record(&record).unwrap();
        assert_eq!(member.id, 12345678901);
        assert!(member.active);
        assert!(member.is_preferred());
        assert!(!member.is_acceptable());
    }

    #[test]
    fn test_short_row_is_rejected() {
        let record = StringRecord::from(vec!["12345678901", "20200101"]);
        let err = Rf2LanguageRefsetMember::from_record(&record).unwrap_err();
        assert!(matches!(err, Rf2Error::TooFewColumns { .. }));
    }
}
