//! Typed entities of the family graph.
//!
//! - [`Person`]: an individual and their parent/spouse/child edges
//! - [`Family`]: a couple and their children
//! - [`Event`]: a dated, placed occurrence
//! - [`Source`], [`Media`], [`NoteRecord`]: flat metadata records
//! - [`FamilyData`]: the collections produced by one parse

mod event;
mod family;
mod person;
mod record;

pub use event::{DateRange, DateValue, Event, EventKind};
pub use family::Family;
pub use person::{Person, PersonName, Sex, SpouseLink};
pub use record::{
    FamilyData, Header, Media, MediaRef, NoteRecord, OpaqueField, Source, SourceCitation,
};

/// Identifier of a person (the xref without its `@` delimiters).
pub type PersonId = String;

/// Identifier of a family.
pub type FamilyId = String;

/// Identifier of a source record.
pub type SourceId = String;

/// Identifier of a media record.
pub type MediaId = String;

/// Identifier of a note record.
pub type NoteId = String;
