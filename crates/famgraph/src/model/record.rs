//! Flat metadata records, citations and the parse output container.

use super::{Family, MediaId, NoteId, Person, SourceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A source (book, register, census...) cited by people and events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Stable id
    pub id: SourceId,
    /// Title
    pub title: Option<String>,
    /// Author / originator
    pub author: Option<String>,
    /// Publication facts
    pub publication: Option<String>,
    /// Transcribed text
    pub text: Option<String>,
    /// Short title
    pub abbreviation: Option<String>,
    /// Notes
    pub notes: Vec<String>,
    /// Tags the converter did not recognize
    pub unknown: Vec<OpaqueField>,
}

/// A multimedia object (photo, scan, document).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Stable id
    pub id: MediaId,
    /// Title
    pub title: Option<String>,
    /// File path or URL
    pub file: Option<String>,
    /// File format (jpg, pdf, ...)
    pub format: Option<String>,
    /// Media type (photo, document, ...)
    pub media_type: Option<String>,
    /// Notes
    pub notes: Vec<String>,
    /// Tags the converter did not recognize
    pub unknown: Vec<OpaqueField>,
}

/// A standalone note record referenced elsewhere by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Stable id
    pub id: NoteId,
    /// Full text
    pub text: String,
}

/// A resolved citation of a source at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    /// Cited source record, if the citation pointed to one
    pub source_id: Option<SourceId>,
    /// Source title, or the inline citation text
    pub title: Option<String>,
    /// Page / location within the source
    pub page: Option<String>,
}

/// A resolved media descriptor at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Media record, if the reference pointed to one
    pub media_id: Option<MediaId>,
    /// File path or URL
    pub file: Option<String>,
    /// File format
    pub format: Option<String>,
    /// Title
    pub title: Option<String>,
}

impl From<&Media> for MediaRef {
    fn from(media: &Media) -> Self {
        Self {
            media_id: Some(media.id.clone()),
            file: media.file.clone(),
            format: media.format.clone(),
            title: media.title.clone(),
        }
    }
}

/// A tag the converter did not interpret, kept with its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueField {
    /// Tag, upper case
    pub tag: String,
    /// Cross-reference id on the defining line, if any
    pub xref: Option<String>,
    /// Raw value
    pub value: Option<String>,
    /// Nested fields
    pub children: Vec<OpaqueField>,
}

/// File header information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Format version (`GEDC.VERS`)
    pub version: Option<String>,
    /// Character set (`CHAR`)
    pub charset: Option<String>,
    /// Language (`LANG`)
    pub language: Option<String>,
    /// Producing system (`SOUR`)
    pub source_system: Option<String>,
    /// Original file name (`FILE`)
    pub filename: Option<String>,
    /// Every header value keyed by dotted tag path, e.g. `GEDC.VERS`
    pub fields: BTreeMap<String, Vec<String>>,
}

impl Header {
    /// First value recorded at a dotted path.
    pub fn field(&self, path: &str) -> Option<&str> {
        self.fields
            .get(path)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Everything produced by one parse: the entity collections handed to the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyData {
    /// Header
    pub header: Header,
    /// Individuals
    pub people: Vec<Person>,
    /// Families
    pub families: Vec<Family>,
    /// Sources
    pub sources: Vec<Source>,
    /// Media objects
    pub media: Vec<Media>,
    /// Standalone notes
    pub notes: Vec<NoteRecord>,
    /// Top-level records of unrecognized type
    pub other_records: Vec<OpaqueField>,
}

impl FamilyData {
    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.families.is_empty()
            && self.sources.is_empty()
            && self.media.is_empty()
    }
}
