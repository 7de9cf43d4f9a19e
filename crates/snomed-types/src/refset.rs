//! SNOMED CT Reference Set types.
//!
//! Only the language reference set is modeled here: it is the one refset
//! family the ingestion core reads, to resolve a preferred term per concept
//! for a configured dialect.

use crate::SctId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A language reference set member from RF2 Language refset files.
///
/// Language refsets indicate whether a description is preferred or acceptable
/// in a particular language/dialect context.
///
/// # RF2 Columns
///
/// | Column | Type | Description |
/// |--------|------|-------------|
/// | id | SCTID | Unique identifier for this member |
/// | effectiveTime | Integer | Date in YYYYMMDD format |
/// | active | Boolean | Whether this membership is active |
/// | moduleId | SCTID | Module containing this member |
/// | refsetId | SCTID | The language reference set (e.g., US English, GB English) |
/// | referencedComponentId | SCTID | The description ID |
/// | acceptabilityId | SCTID | Preferred (900000000000548007) or Acceptable (900000000000549004) |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rf2LanguageRefsetMember {
    /// Unique identifier for this reference set member.
    pub id: SctId,
    /// Effective time as YYYYMMDD integer.
    pub effective_time: u32,
    /// Whether this membership is currently active.
    pub active: bool,
    /// Module this member belongs to.
    pub module_id: SctId,
    /// The language reference set (dialect) this member belongs to.
    pub refset_id: SctId,
    /// The description ID that is a member.
    pub referenced_component_id: SctId,
    /// Acceptability: Preferred (900000000000548007) or Acceptable (900000000000549004).
    pub acceptability_id: SctId,
}

impl Rf2LanguageRefsetMember {
    /// SCTID for "Preferred" acceptability.
    pub const PREFERRED_ID: SctId = 900000000000548007;
    /// SCTID for "Acceptable" acceptability.
    pub const ACCEPTABLE_ID: SctId = 900000000000549004;

    /// Returns true if this description is preferred in this dialect.
    pub fn is_preferred(&self) -> bool {
        self.acceptability_id == Self::PREFERRED_ID
    }

    /// Returns true if this description is acceptable (but not preferred) in this dialect.
    pub fn is_acceptable(&self) -> bool {
        self.acceptability_id == Self::ACCEPTABLE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well_known;

    #[test]
    fn test_language_refset_preferred() {
        let member = Rf2LanguageRefsetMember {
            id: 12345678901,
            effective_time: 20200101,
            active: true,
            module_id: 900000000000207008,
            refset_id: well_known::US_ENGLISH_LANGUAGE_REFSET,
            referenced_component_id: 12345678,
            acceptability_id: Rf2LanguageRefsetMember::PREFERRED_ID,
        };

        assert!(member.is_preferred());
        assert!(!member.is_acceptable());
    }

    #[test]
    fn test_language_refset_acceptable() {
        let member = Rf2LanguageRefsetMember {
            id: 12345678901,
            effective_time: 20200101,
            active: true,
            module_id: 900000000000207008,
            refset_id: well_known::US_ENGLISH_LANGUAGE_REFSET,
            referenced_component_id: 12345678,
            acceptability_id: Rf2LanguageRefsetMember::ACCEPTABLE_ID,
        };

        assert!(!member.is_preferred());
        assert!(member.is_acceptable());
    }
}
