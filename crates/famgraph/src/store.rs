//! Explicitly owned holder of the current family graph.
//!
//! A load links and indexes the new data off to the side, then replaces the
//! current graph with a single pointer swap. Readers take an `Arc` snapshot
//! and keep seeing the graph they started with, never a half-built one.

use crate::graph::FamilyGraph;
use crate::linker::{link_families, LinkStats};
use crate::model::FamilyData;
use log::info;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// The current graph of an application, replaceable atomically.
#[derive(Debug)]
pub struct FamilyStore {
    current: RwLock<Arc<FamilyGraph>>,
}

impl FamilyStore {
    /// Create a store holding an empty graph.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(FamilyGraph::empty())),
        }
    }

    /// Replace the current graph with `data`.
    ///
    /// Linking and indexing happen before the swap; the previous graph is
    /// discarded entirely (no merge).
    pub fn load(&self, mut data: FamilyData) -> LinkStats {
        let stats = link_families(&mut data);
        let graph = FamilyGraph::new(data);
        info!(
            "Loaded graph {}: {} people, {} families",
            graph.load_id(),
            graph.person_count(),
            graph.family_count()
        );
        self.replace(graph);
        stats
    }

    /// Swap in an already built graph.
    pub fn replace(&self, graph: FamilyGraph) {
        let graph = Arc::new(graph);
        // A reader that panicked cannot leave the Arc half-written
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = graph;
    }

    /// Drop the current graph and its index.
    pub fn clear(&self) {
        self.replace(FamilyGraph::empty());
        info!("Cleared family store");
    }

    /// The graph as of now; unaffected by later loads.
    pub fn snapshot(&self) -> Arc<FamilyGraph> {
        let current = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&current)
    }

    /// Whether a non-empty graph is loaded.
    pub fn is_loaded(&self) -> bool {
        !self.snapshot().is_empty()
    }

    /// Id of the current load.
    pub fn load_id(&self) -> Uuid {
        self.snapshot().load_id()
    }
}

impl Default for FamilyStore {
    fn default() -> Self {
        Self::new()
    }
}
