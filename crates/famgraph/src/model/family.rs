//! Family records: a couple and their children.

use super::{Event, FamilyId, MediaRef, OpaqueField, PersonId, SourceCitation};
use serde::{Deserialize, Serialize};

/// A family unit.
///
/// Either spouse may be missing; a family with neither still groups its
/// children as siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Family {
    /// Stable id, unique within a load
    pub id: FamilyId,
    /// Husband / first partner
    pub husband: Option<PersonId>,
    /// Wife / second partner
    pub wife: Option<PersonId>,
    /// Children in source order
    pub children: Vec<PersonId>,
    /// Marriage event
    pub marriage: Option<Event>,
    /// Divorce event
    pub divorce: Option<Event>,
    /// Other family events (engagement, annulment, ...)
    pub events: Vec<Event>,
    /// Notes
    pub notes: Vec<String>,
    /// Source citations
    pub sources: Vec<SourceCitation>,
    /// Attached media
    pub media: Vec<MediaRef>,
    /// Tags the converter did not recognize
    pub unknown: Vec<OpaqueField>,
}

impl Family {
    /// Create an empty family.
    pub fn new(id: impl Into<FamilyId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Both spouses, when both are recorded.
    pub fn couple(&self) -> Option<(&str, &str)> {
        match (&self.husband, &self.wife) {
            (Some(h), Some(w)) => Some((h.as_str(), w.as_str())),
            _ => None,
        }
    }

    /// Recorded spouses, husband first.
    pub fn spouses(&self) -> impl Iterator<Item = &PersonId> {
        self.husband.iter().chain(self.wife.iter())
    }
}
