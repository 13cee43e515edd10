//! The indexed family graph and the queries over it.
//!
//! This module defines:
//! - [`FamilyGraph`]: the immutable read model built from one load
//! - [`algorithms`]: ancestor/descendant walks and relationship search
//! - [`TimelineEvent`]: dated births, deaths and marriages
//! - [`GraphStatistics`]: aggregate counts over a load

mod family_graph;
mod statistics;
mod timeline;
pub mod algorithms;

pub use algorithms::{GenerationEntry, Kinship, PathStep, Relationship, StepKind};
pub use family_graph::{FamilyGraph, DEFAULT_MAX_GENERATIONS};
pub use statistics::GraphStatistics;
pub use timeline::{MarriageAttribution, TimelineEvent, TimelineKind};
