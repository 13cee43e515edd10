//! # famgraph
//!
//! An in-memory family graph: people, families, sources and media linked by
//! parent/child/spouse edges, with traversal and kinship queries on top.
//!
//! ## Core Principles
//!
//! - **Format Agnostic**: Bring your own parser, we handle the graph
//! - **Bidirectional Integrity**: Every parent link has its child link, every spouse link is mutual
//! - **Total Queries**: Unknown ids and empty graphs yield empty results, never errors
//! - **Atomic Loads**: A new dataset replaces the old one in a single swap
//!
//! ## Architecture
//!
//! ```text
//! Parsers (famgraph-gedcom, ...)
//!     ↓
//! FamilyData (people, families, sources, media)
//!     ↓
//! Linker (parent/child/spouse edges)
//!     ↓
//! FamilyGraph (id index, queries, relationship search)
//!     ↓
//! FamilyStore (snapshot swap for concurrent readers)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use famgraph::{helpers, FamilyData, FamilyStore, Sex};
//!
//! # fn main() -> famgraph::Result<()> {
//! let mut data = FamilyData::default();
//! helpers::add_person(&mut data, "I1", "John /Smith/", Sex::Male)?;
//! helpers::add_person(&mut data, "I2", "Mary /Jones/", Sex::Female)?;
//! helpers::add_person(&mut data, "I3", "Ann /Smith/", Sex::Female)?;
//! helpers::add_family(&mut data, "F1", Some("I1"), Some("I2"), &["I3"])?;
//!
//! let store = FamilyStore::new();
//! store.load(data);
//!
//! let graph = store.snapshot();
//! assert_eq!(graph.calculate_relationship("I1", "I3").label(), "Parent");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod graph;
pub mod helpers;
pub mod linker;
pub mod model;
pub mod query;
pub mod store;

// Re-export main types
pub use error::{GraphError, Result};
pub use graph::{
    FamilyGraph, GenerationEntry, GraphStatistics, Kinship, MarriageAttribution, PathStep,
    Relationship, StepKind, TimelineEvent, TimelineKind, DEFAULT_MAX_GENERATIONS,
};
pub use linker::{link_families, LinkStats};
pub use model::{
    DateRange, DateValue, Event, EventKind, Family, FamilyData, FamilyId, Header, Media,
    MediaId, MediaRef, NoteId, NoteRecord, OpaqueField, Person, PersonId, PersonName, Sex,
    Source, SourceCitation, SourceId, SpouseLink,
};
pub use query::PersonQuery;
pub use store::FamilyStore;
