//! Traversal and kinship algorithms over a [`FamilyGraph`].
//!
//! Ancestor/descendant walks are iterative depth-first traversals with an
//! explicit visited set, so cyclic or very deep files cannot blow the stack.
//! Relationship search is a breadth-first search over parent, child and
//! spouse edges.

use super::family_graph::{FamilyGraph, DEFAULT_MAX_GENERATIONS};
use crate::model::{Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// A person reached by a traversal and their distance from the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationEntry<'a> {
    /// The person reached
    pub person: &'a Person,
    /// Hops from the root; the root's direct parents/children are generation 1
    pub generation: usize,
}

/// Ancestors of `id` in pre-order, following `parents` edges.
///
/// The root itself is not included. Each person appears at most once, and
/// nobody further than `max_generations` hops is returned.
pub fn ancestors<'a>(
    graph: &'a FamilyGraph,
    id: &str,
    max_generations: Option<usize>,
) -> Vec<GenerationEntry<'a>> {
    walk(graph, id, max_generations, |person| &person.parents)
}

/// Descendants of `id` in pre-order, following `children` edges.
pub fn descendants<'a>(
    graph: &'a FamilyGraph,
    id: &str,
    max_generations: Option<usize>,
) -> Vec<GenerationEntry<'a>> {
    walk(graph, id, max_generations, |person| &person.children)
}

fn walk<'a, F>(
    graph: &'a FamilyGraph,
    id: &str,
    max_generations: Option<usize>,
    edges: F,
) -> Vec<GenerationEntry<'a>>
where
    F: Fn(&'a Person) -> &'a [PersonId],
{
    let max = max_generations.unwrap_or(DEFAULT_MAX_GENERATIONS);
    let Some(root) = graph.person(id) else {
        return Vec::new();
    };

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![(root, 0usize)];
    let mut result = Vec::new();

    while let Some((current, generation)) = stack.pop() {
        // A person can be pushed along several paths; only the first pop counts
        if !visited.insert(current.id.as_str()) {
            continue;
        }
        if generation > 0 {
            result.push(GenerationEntry {
                person: current,
                generation,
            });
        }
        if generation >= max {
            continue;
        }

        // Reverse so the first edge is popped first
        for next_id in edges(current).iter().rev() {
            if visited.contains(next_id.as_str()) {
                continue;
            }
            if let Some(next) = graph.person(next_id) {
                stack.push((next, generation + 1));
            }
        }
    }

    result
}

/// How a relationship path moves from one person to the next.
///
/// Named for what the person being left is to the person being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// The previous person is a parent of this one
    ParentOf,
    /// The previous person is a child of this one
    ChildOf,
    /// The previous person is a spouse of this one
    SpouseOf,
}

/// One person on a relationship path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Person at this position
    pub person_id: PersonId,
    /// Edge used to arrive here; `None` for the starting person
    pub via: Option<StepKind>,
}

/// Natural-language kinship of the first person to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kinship {
    /// Same person
    SelfPerson,
    /// Direct spouse
    Spouse,
    /// Parent
    Parent,
    /// Spouse of a parent
    ParentsSpouse,
    /// Child
    Child,
    /// Child of a spouse
    SpousesChild,
    /// Grandparent
    Grandparent,
    /// Grandchild
    Grandchild,
    /// Great-grandparent
    GreatGrandparent,
    /// Great-grandchild
    GreatGrandchild,
    /// Sibling or half-sibling
    Sibling,
    /// Aunt or uncle
    AuntUncle,
    /// Niece or nephew
    NieceNephew,
    /// First cousin
    FirstCousin,
    /// Cousin of some degree, possibly removed
    Cousin {
        /// 1 for first cousins, 2 for second...
        degree: usize,
        /// Generations of difference
        removed: usize,
    },
    /// Connected, but by no named relationship
    Related {
        /// Path length in edges
        steps: usize,
    },
    /// No path between the two people
    NotRelated,
}

impl std::fmt::Display for Kinship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kinship::SelfPerson => write!(f, "Self"),
            Kinship::Spouse => write!(f, "Spouse"),
            Kinship::Parent => write!(f, "Parent"),
            Kinship::ParentsSpouse => write!(f, "Parent's spouse"),
            Kinship::Child => write!(f, "Child"),
            Kinship::SpousesChild => write!(f, "Spouse's child"),
            Kinship::Grandparent => write!(f, "Grandparent"),
            Kinship::Grandchild => write!(f, "Grandchild"),
            Kinship::GreatGrandparent => write!(f, "Great-grandparent"),
            Kinship::GreatGrandchild => write!(f, "Great-grandchild"),
            Kinship::Sibling => write!(f, "Sibling"),
            Kinship::AuntUncle => write!(f, "Aunt/Uncle"),
            Kinship::NieceNephew => write!(f, "Niece/Nephew"),
            Kinship::FirstCousin => write!(f, "First cousin"),
            Kinship::Cousin { degree, removed } => {
                write!(f, "{} cousin", ordinal(*degree))?;
                if *removed > 0 {
                    write!(f, " {removed}x removed")?;
                }
                Ok(())
            }
            Kinship::Related { steps } => write!(f, "Related, {steps} steps"),
            Kinship::NotRelated => write!(f, "No relationship found"),
        }
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Result of a relationship search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// What the first person is to the second
    pub kind: Kinship,
    /// People from the first to the second, inclusive; empty when unrelated
    pub path: Vec<PathStep>,
}

impl Relationship {
    fn not_related() -> Self {
        Self {
            kind: Kinship::NotRelated,
            path: Vec::new(),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> String {
        self.kind.to_string()
    }

    /// Whether a path was found.
    pub fn is_related(&self) -> bool {
        self.kind != Kinship::NotRelated
    }

    /// Number of edges on the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Breadth-first search for the shortest path from `a` to `b`.
///
/// Expands parent, child and spouse edges (in that order, each in stored list
/// order) from every visited person and stops at the first discovery of `b`,
/// so ties between equally short paths are broken deterministically.
pub fn calculate_relationship(graph: &FamilyGraph, a: &str, b: &str) -> Relationship {
    if a == b {
        return Relationship {
            kind: Kinship::SelfPerson,
            path: vec![PathStep {
                person_id: a.to_string(),
                via: None,
            }],
        };
    }

    let (Some(start), Some(_)) = (graph.person(a), graph.person(b)) else {
        return Relationship::not_related();
    };

    // person -> (predecessor, edge used to get here)
    let mut came_from: HashMap<&str, (&str, StepKind)> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start.id.as_str());
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let neighbors = current
            .parents
            .iter()
            .map(|id| (id, StepKind::ChildOf))
            .chain(current.children.iter().map(|id| (id, StepKind::ParentOf)))
            .chain(current.spouses.iter().map(|s| (&s.spouse_id, StepKind::SpouseOf)));

        for (next_id, step) in neighbors {
            let Some(next) = graph.person(next_id) else {
                continue;
            };
            if !visited.insert(next.id.as_str()) {
                continue;
            }
            came_from.insert(next.id.as_str(), (current.id.as_str(), step));

            if next.id == b {
                let path = reconstruct(&came_from, start.id.as_str(), next.id.as_str());
                return Relationship {
                    kind: classify(&path),
                    path,
                };
            }
            queue.push_back(next);
        }
    }

    Relationship::not_related()
}

fn reconstruct(came_from: &HashMap<&str, (&str, StepKind)>, start: &str, end: &str) -> Vec<PathStep> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        let Some(&(previous, step)) = came_from.get(current) else {
            break;
        };
        path.push(PathStep {
            person_id: current.to_string(),
            via: Some(step),
        });
        current = previous;
    }
    path.push(PathStep {
        person_id: start.to_string(),
        via: None,
    });
    path.reverse();
    path
}

/// Derive a label from the counts of parent and child steps on a path.
fn classify(path: &[PathStep]) -> Kinship {
    let mut parent_steps = 0usize;
    let mut child_steps = 0usize;
    let mut has_spouse = false;
    for step in path.iter().filter_map(|s| s.via) {
        match step {
            StepKind::ParentOf => parent_steps += 1,
            StepKind::ChildOf => child_steps += 1,
            StepKind::SpouseOf => has_spouse = true,
        }
    }
    let steps = path.len().saturating_sub(1);

    match (parent_steps, child_steps) {
        (0, 0) if has_spouse && steps == 1 => Kinship::Spouse,
        (1, 0) if has_spouse => Kinship::ParentsSpouse,
        (1, 0) => Kinship::Parent,
        (0, 1) if has_spouse => Kinship::SpousesChild,
        (0, 1) => Kinship::Child,
        (2, 0) => Kinship::Grandparent,
        (0, 2) => Kinship::Grandchild,
        (3, 0) => Kinship::GreatGrandparent,
        (0, 3) => Kinship::GreatGrandchild,
        (1, 1) => Kinship::Sibling,
        (2, 1) => Kinship::AuntUncle,
        (1, 2) => Kinship::NieceNephew,
        (2, 2) => Kinship::FirstCousin,
        (p, c) if p.min(c) >= 2 => Kinship::Cousin {
            degree: p.min(c) - 1,
            removed: p.abs_diff(c),
        },
        _ => Kinship::Related { steps },
    }
}
