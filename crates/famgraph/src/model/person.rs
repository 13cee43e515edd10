//! Individuals and their graph edges.

use super::{Event, EventKind, FamilyId, MediaRef, OpaqueField, PersonId, SourceCitation};
use serde::{Deserialize, Serialize};

/// Recorded sex of an individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
    /// Absent or anything other than male/female
    #[default]
    Unknown,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
            Sex::Unknown => write!(f, "unknown"),
        }
    }
}

/// A personal name split into its conventional parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Full display name, slashes removed
    pub full: String,
    /// Given name(s)
    pub given: Option<String>,
    /// Surname
    pub surname: Option<String>,
    /// Name prefix (e.g. "Dr.")
    pub prefix: Option<String>,
    /// Name suffix (e.g. "Jr.")
    pub suffix: Option<String>,
    /// Nickname
    pub nickname: Option<String>,
    /// Name type (`birth`, `married`, `aka`...)
    pub name_type: Option<String>,
    /// Tags the converter did not recognize
    pub unknown: Vec<OpaqueField>,
}

impl PersonName {
    /// Parse the conventional `Given /Surname/ Suffix` layout.
    ///
    /// Text before the first slash is the given name, text between the slashes
    /// is the surname and anything after the closing slash is the suffix. A
    /// name without slashes is all given name.
    pub fn parse_slashed(raw: &str) -> Self {
        let raw = raw.trim();
        let mut parts = raw.splitn(3, '/');
        let given = parts.next().map(str::trim).unwrap_or_default();
        let surname = parts.next().map(str::trim).unwrap_or_default();
        let suffix = parts.next().map(str::trim).unwrap_or_default();

        let full = [given, surname, suffix]
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            full,
            given: non_empty(given),
            surname: non_empty(surname),
            suffix: non_empty(suffix),
            ..Default::default()
        }
    }

    /// Recompute `full` from the parts.
    pub fn rebuild_full(&mut self) {
        self.full = [&self.prefix, &self.given, &self.surname, &self.suffix]
            .iter()
            .filter_map(|part| part.as_deref())
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");
    }

    /// Whether no part of the name is known.
    pub fn is_empty(&self) -> bool {
        self.full.is_empty() && self.given.is_none() && self.surname.is_none()
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// One side of a couple, as seen from the other spouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpouseLink {
    /// The other spouse
    pub spouse_id: PersonId,
    /// Family record that joined them
    pub family_id: Option<FamilyId>,
    /// Marriage event of that family
    pub marriage: Option<Event>,
    /// Divorce event of that family
    pub divorce: Option<Event>,
}

/// An individual in the family graph.
///
/// The `parents`, `spouses` and `children` edge lists are filled in by
/// [`crate::linker::link_families`], which keeps them mutual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Stable id, unique within a load
    pub id: PersonId,
    /// Primary name
    pub name: PersonName,
    /// Additional names (married names, aliases)
    pub alternate_names: Vec<PersonName>,
    /// Recorded sex
    pub sex: Sex,
    /// Life events in source order
    pub events: Vec<Event>,
    /// Occupations
    pub occupations: Vec<String>,
    /// Education entries
    pub education: Vec<String>,
    /// Religious affiliations
    pub religion: Vec<String>,
    /// Notes, continuation-joined and reference-resolved
    pub notes: Vec<String>,
    /// Attached media
    pub media: Vec<MediaRef>,
    /// Source citations
    pub sources: Vec<SourceCitation>,
    /// Families this person is a child of, as declared on the person
    pub child_of_families: Vec<FamilyId>,
    /// Families this person is a spouse in, as declared on the person
    pub spouse_of_families: Vec<FamilyId>,
    /// User reference numbers
    pub user_references: Vec<String>,
    /// Record id assigned by the originating tool
    pub record_id: Option<String>,
    /// Ancestral file number
    pub ancestral_file_number: Option<String>,
    /// Last change date as written
    pub last_changed: Option<String>,
    /// Tags the converter did not recognize
    pub unknown: Vec<OpaqueField>,
    /// Parent ids
    pub parents: Vec<PersonId>,
    /// Spouse links
    pub spouses: Vec<SpouseLink>,
    /// Child ids
    pub children: Vec<PersonId>,
}

impl Person {
    /// Create a person with an id and a name.
    pub fn new(id: impl Into<PersonId>, name: PersonName, sex: Sex) -> Self {
        Self {
            id: id.into(),
            name,
            sex,
            ..Default::default()
        }
    }

    /// First event of the given kind.
    pub fn event(&self, kind: &EventKind) -> Option<&Event> {
        self.events.iter().find(|e| &e.kind == kind)
    }

    /// Birth event.
    pub fn birth(&self) -> Option<&Event> {
        self.event(&EventKind::Birth)
    }

    /// Death event.
    pub fn death(&self) -> Option<&Event> {
        self.event(&EventKind::Death)
    }

    /// Birth year, when known.
    pub fn birth_year(&self) -> Option<i32> {
        self.birth().and_then(Event::year)
    }

    /// Death year, when known.
    pub fn death_year(&self) -> Option<i32> {
        self.death().and_then(Event::year)
    }

    /// Name for display, never empty.
    pub fn display_name(&self) -> &str {
        if self.name.full.is_empty() {
            "Unknown"
        } else {
            &self.name.full
        }
    }

    /// Whether `other` is listed among this person's spouses.
    pub fn is_spouse_of(&self, other: &str) -> bool {
        self.spouses.iter().any(|s| s.spouse_id == other)
    }
}
