//! Life and family events with partially known dates.

use serde::{Deserialize, Serialize};

/// Kind of event attached to a person or family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    /// Birth
    Birth,
    /// Death
    Death,
    /// Baptism
    Baptism,
    /// Christening
    Christening,
    /// Burial
    Burial,
    /// Cremation
    Cremation,
    /// Confirmation
    Confirmation,
    /// First communion
    FirstCommunion,
    /// Bar mitzvah
    BarMitzvah,
    /// Bas mitzvah
    BasMitzvah,
    /// Blessing
    Blessing,
    /// Ordination
    Ordination,
    /// Graduation
    Graduation,
    /// Retirement
    Retirement,
    /// Emigration
    Emigration,
    /// Immigration
    Immigration,
    /// Naturalization
    Naturalization,
    /// Residence at a place for some period
    Residence,
    /// Adoption
    Adoption,
    /// Census enumeration
    Census,
    /// Probate of a will
    Probate,
    /// Will signed
    Will,
    /// Marriage
    Marriage,
    /// Divorce
    Divorce,
    /// Divorce filed
    DivorceFiled,
    /// Annulment
    Annulment,
    /// Engagement
    Engagement,
    /// Marriage banns
    MarriageBanns,
    /// Marriage contract
    MarriageContract,
    /// Marriage license
    MarriageLicense,
    /// Marriage settlement
    MarriageSettlement,
    /// Any other event, labelled by its type text
    Other(String),
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventKind::Birth => "Birth",
            EventKind::Death => "Death",
            EventKind::Baptism => "Baptism",
            EventKind::Christening => "Christening",
            EventKind::Burial => "Burial",
            EventKind::Cremation => "Cremation",
            EventKind::Confirmation => "Confirmation",
            EventKind::FirstCommunion => "First communion",
            EventKind::BarMitzvah => "Bar mitzvah",
            EventKind::BasMitzvah => "Bas mitzvah",
            EventKind::Blessing => "Blessing",
            EventKind::Ordination => "Ordination",
            EventKind::Graduation => "Graduation",
            EventKind::Retirement => "Retirement",
            EventKind::Emigration => "Emigration",
            EventKind::Immigration => "Immigration",
            EventKind::Naturalization => "Naturalization",
            EventKind::Residence => "Residence",
            EventKind::Adoption => "Adoption",
            EventKind::Census => "Census",
            EventKind::Probate => "Probate",
            EventKind::Will => "Will",
            EventKind::Marriage => "Marriage",
            EventKind::Divorce => "Divorce",
            EventKind::DivorceFiled => "Divorce filed",
            EventKind::Annulment => "Annulment",
            EventKind::Engagement => "Engagement",
            EventKind::MarriageBanns => "Marriage banns",
            EventKind::MarriageContract => "Marriage contract",
            EventKind::MarriageLicense => "Marriage license",
            EventKind::MarriageSettlement => "Marriage settlement",
            EventKind::Other(label) => return write!(f, "{label}"),
        };
        write!(f, "{label}")
    }
}

/// Range classifier carried by a date qualifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    /// Plain date
    #[default]
    None,
    /// `BEF` / `TO`
    Before,
    /// `AFT` / `FROM`
    After,
    /// `BET ... AND ...` / `FROM ... TO ...`
    Between,
}

/// A date as written in the source, plus whatever structure could be read from it.
///
/// Every numeric field is independently optional: `"MAR 1890"` has no day,
/// `"1890"` has neither day nor month, and free text keeps only `original`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    /// The date text exactly as it appeared
    pub original: String,
    /// Year, when recognized
    pub year: Option<i32>,
    /// Month 1-12, when recognized
    pub month: Option<u8>,
    /// Day of month, when recognized
    pub day: Option<u8>,
    /// `ABT` / `EST` / `CAL`
    pub approximate: bool,
    /// Range qualifier
    pub range: DateRange,
    /// Year of the second bound of a between-range
    pub end_year: Option<i32>,
}

impl DateValue {
    /// A date whose text could not be interpreted.
    pub fn unparsed(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            ..Default::default()
        }
    }

    /// A plain year.
    pub fn from_year(year: i32) -> Self {
        Self {
            original: year.to_string(),
            year: Some(year),
            ..Default::default()
        }
    }

    /// Whether any numeric component was recognized.
    pub fn is_parsed(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    /// Chronological sort key; unknown components sort first within their year.
    pub fn sort_key(&self) -> (i32, u8, u8) {
        (
            self.year.unwrap_or(i32::MIN),
            self.month.unwrap_or(0),
            self.day.unwrap_or(0),
        )
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// A dated, placed occurrence in a person's or family's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// What happened
    pub kind: EventKind,
    /// When it happened
    pub date: Option<DateValue>,
    /// Where it happened (opaque place string)
    pub place: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Cause (usually of death)
    pub cause: Option<String>,
    /// Age of the principal at the event
    pub age: Option<String>,
    /// Free-text description or type
    pub description: Option<String>,
    /// Notes on the event
    pub notes: Vec<String>,
    /// Citations for the event
    pub sources: Vec<super::SourceCitation>,
    /// Tags the converter did not recognize
    pub unknown: Vec<super::OpaqueField>,
}

impl Event {
    /// Create an event with nothing but a kind.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            date: None,
            place: None,
            address: None,
            cause: None,
            age: None,
            description: None,
            notes: Vec::new(),
            sources: Vec::new(),
            unknown: Vec::new(),
        }
    }

    /// Builder: set the date.
    pub fn with_date(mut self, date: DateValue) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder: set the place.
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    /// Year of the event, when known.
    pub fn year(&self) -> Option<i32> {
        self.date.as_ref().and_then(|d| d.year)
    }
}
