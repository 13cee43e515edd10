//! JSON export of the dataset and of nested pedigrees.

use crate::error::{GraphError, Result};
use crate::graph::{FamilyGraph, DEFAULT_MAX_GENERATIONS};
use crate::model::{Person, Sex};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::path::Path;

/// One person in a pedigree tree, with their own parents nested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PedigreeNode {
    /// Person id
    pub id: String,
    /// Display name
    pub name: String,
    /// Sex
    pub sex: Sex,
    /// Birth year, when known
    pub birth_year: Option<i32>,
    /// Death year, when known
    pub death_year: Option<i32>,
    /// Distance from the root; the root is generation 0
    pub generation: usize,
    /// Set when this person is expanded elsewhere in the tree; such nodes
    /// carry no parents
    pub repeat_of: Option<String>,
    /// Parents, in stored order
    pub parents: Vec<PedigreeNode>,
}

/// Export the whole dataset (header, people, families, records) as JSON.
pub fn export_json(graph: &FamilyGraph) -> Result<String> {
    serde_json::to_string_pretty(graph.data())
        .map_err(|e| GraphError::serialization("Failed to encode family data", Some(e)))
}

/// Write [`export_json`] output to a file.
pub fn write_json(graph: &FamilyGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = export_json(graph)?;
    std::fs::write(path, json).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the ancestor tree of `id`, at most `max_generations` deep.
///
/// Generations are filled breadth-first and each person is expanded once, at
/// the nearest generation they appear in. Later appearances (pedigree
/// collapse, cyclic data) become leaves with `repeat_of` set, so the tree
/// grows with the number of people rather than the number of paths.
pub fn pedigree(
    graph: &FamilyGraph,
    id: &str,
    max_generations: Option<usize>,
) -> Result<PedigreeNode> {
    let root = graph.require_person(id)?;
    let max = max_generations.unwrap_or(DEFAULT_MAX_GENERATIONS);

    // Slot parents always have larger indices than the slot itself
    let mut slots = vec![Slot::new(root, 0, false)];
    let mut placed = HashSet::from([root.id.as_str()]);
    let mut queue = VecDeque::from([(0, root)]);

    while let Some((index, person)) = queue.pop_front() {
        let generation = slots[index].node.generation;
        if generation >= max {
            continue;
        }
        for parent in graph.parents(&person.id) {
            let first_visit = placed.insert(parent.id.as_str());
            let slot = slots.len();
            slots.push(Slot::new(parent, generation + 1, !first_visit));
            slots[index].parents.push(slot);
            if first_visit {
                queue.push_back((slot, parent));
            }
        }
    }

    let mut built: Vec<Option<PedigreeNode>> = (0..slots.len()).map(|_| None).collect();
    for (index, slot) in slots.into_iter().enumerate().rev() {
        let mut node = slot.node;
        node.parents = slot
            .parents
            .iter()
            .filter_map(|&parent| built[parent].take())
            .collect();
        built[index] = Some(node);
    }

    built
        .swap_remove(0)
        .ok_or_else(|| GraphError::invalid(format!("Pedigree of {id} has no root")))
}

struct Slot {
    node: PedigreeNode,
    parents: Vec<usize>,
}

impl Slot {
    fn new(person: &Person, generation: usize, repeat: bool) -> Self {
        Self {
            node: PedigreeNode {
                id: person.id.clone(),
                name: person.display_name().to_string(),
                sex: person.sex,
                birth_year: person.birth_year(),
                death_year: person.death_year(),
                generation,
                repeat_of: repeat.then(|| person.id.clone()),
                parents: Vec::new(),
            },
            parents: Vec::new(),
        }
    }
}

/// Export the ancestor tree of `id` as JSON.
///
/// # Errors
///
/// [`GraphError::PersonNotFound`] if `id` is not in the graph.
pub fn export_pedigree_json(
    graph: &FamilyGraph,
    id: &str,
    max_generations: Option<usize>,
) -> Result<String> {
    let tree = pedigree(graph, id, max_generations)?;
    serde_json::to_string_pretty(&tree)
        .map_err(|e| GraphError::serialization("Failed to encode pedigree", Some(e)))
}
