//! Indexed read model over one loaded dataset.

use super::algorithms::{self, GenerationEntry, Relationship};
use crate::error::{GraphError, Result};
use crate::model::{
    Family, FamilyData, Header, Media, Person, Source, SpouseLink,
};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Default traversal depth for ancestor/descendant queries.
pub const DEFAULT_MAX_GENERATIONS: usize = 10;

/// An immutable, indexed family graph.
///
/// `FamilyGraph` owns the entities of one load plus id→position indexes for
/// O(1) lookups. Every query is total: unknown ids yield empty results.
#[derive(Debug, Clone)]
pub struct FamilyGraph {
    data: FamilyData,
    load_id: Uuid,
    // id -> position in the owning Vec; first definition wins
    person_index: HashMap<String, usize>,
    family_index: HashMap<String, usize>,
    source_index: HashMap<String, usize>,
    media_index: HashMap<String, usize>,
}

impl FamilyGraph {
    /// Index a dataset.
    ///
    /// The data is expected to be linked already (see
    /// [`crate::linker::link_families`]); indexing does not touch edges.
    pub fn new(data: FamilyData) -> Self {
        let person_index = build_index(data.people.iter().map(|p| p.id.as_str()), "person");
        let family_index = build_index(data.families.iter().map(|f| f.id.as_str()), "family");
        let source_index = build_index(data.sources.iter().map(|s| s.id.as_str()), "source");
        let media_index = build_index(data.media.iter().map(|m| m.id.as_str()), "media");

        let load_id = Uuid::new_v4();
        debug!(
            "Indexed graph {load_id}: {} people, {} families, {} sources, {} media",
            data.people.len(),
            data.families.len(),
            data.sources.len(),
            data.media.len()
        );

        Self {
            data,
            load_id,
            person_index,
            family_index,
            source_index,
            media_index,
        }
    }

    /// A graph with nothing in it.
    pub fn empty() -> Self {
        Self::new(FamilyData::default())
    }

    /// Unique id of this load; a reload always produces a different one.
    pub fn load_id(&self) -> Uuid {
        self.load_id
    }

    /// Underlying entity collections.
    pub fn data(&self) -> &FamilyData {
        &self.data
    }

    /// Take back the entity collections.
    pub fn into_data(self) -> FamilyData {
        self.data
    }

    /// File header of the load.
    pub fn header(&self) -> &Header {
        &self.data.header
    }

    /// Whether the graph holds no people and no families.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of people.
    pub fn person_count(&self) -> usize {
        self.data.people.len()
    }

    /// Number of families.
    pub fn family_count(&self) -> usize {
        self.data.families.len()
    }

    // ===== Lookups =====

    /// All people in load order.
    pub fn people(&self) -> &[Person] {
        &self.data.people
    }

    /// Look up a person by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.person_index.get(id).map(|&pos| &self.data.people[pos])
    }

    /// Look up a person, failing with [`GraphError::PersonNotFound`].
    pub fn require_person(&self, id: &str) -> Result<&Person> {
        self.person(id).ok_or_else(|| GraphError::PersonNotFound {
            person_id: id.to_string(),
        })
    }

    /// All families in load order.
    pub fn families(&self) -> &[Family] {
        &self.data.families
    }

    /// Look up a family by id.
    pub fn family(&self, id: &str) -> Option<&Family> {
        self.family_index.get(id).map(|&pos| &self.data.families[pos])
    }

    /// All sources.
    pub fn sources(&self) -> &[Source] {
        &self.data.sources
    }

    /// Look up a source by id.
    pub fn source(&self, id: &str) -> Option<&Source> {
        self.source_index.get(id).map(|&pos| &self.data.sources[pos])
    }

    /// All media objects.
    pub fn media(&self) -> &[Media] {
        &self.data.media
    }

    /// Look up a media object by id.
    pub fn media_item(&self, id: &str) -> Option<&Media> {
        self.media_index.get(id).map(|&pos| &self.data.media[pos])
    }

    // ===== Search =====

    /// Case-insensitive substring search over full, given and surname.
    ///
    /// Results keep load order. The query is matched as given, spaces
    /// included; an empty or all-whitespace query matches nobody.
    pub fn search_people(&self, query: &str) -> Vec<&Person> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        self.data
            .people
            .iter()
            .filter(|person| {
                let name = &person.name;
                std::iter::once(Some(name.full.as_str()))
                    .chain([name.given.as_deref(), name.surname.as_deref()])
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Start a fluent query over people.
    pub fn query(&self) -> crate::query::PersonQuery<'_> {
        crate::query::PersonQuery::new(self)
    }

    // ===== One-hop projections =====

    /// Parents of a person.
    pub fn parents(&self, id: &str) -> Vec<&Person> {
        self.resolve_all(self.person(id).map(|p| p.parents.as_slice()))
    }

    /// Children of a person.
    pub fn children(&self, id: &str) -> Vec<&Person> {
        self.resolve_all(self.person(id).map(|p| p.children.as_slice()))
    }

    /// Spouses of a person, one entry per spouse even across several families.
    pub fn spouses(&self, id: &str) -> Vec<&Person> {
        let Some(person) = self.person(id) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        person
            .spouses
            .iter()
            .filter(|link| seen.insert(link.spouse_id.as_str()))
            .filter_map(|link| self.person(&link.spouse_id))
            .collect()
    }

    /// Spouse links of a person, with marriage/divorce data.
    pub fn spouse_links(&self, id: &str) -> &[SpouseLink] {
        self.person(id).map(|p| p.spouses.as_slice()).unwrap_or(&[])
    }

    /// Every other child of any of this person's parents, half-siblings included.
    pub fn siblings(&self, id: &str) -> Vec<&Person> {
        let Some(person) = self.person(id) else {
            return Vec::new();
        };

        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(person.id.as_str());

        let mut result = Vec::new();
        for parent in self.parents(id) {
            for child_id in &parent.children {
                if seen.insert(child_id.as_str()) {
                    if let Some(child) = self.person(child_id) {
                        result.push(child);
                    }
                }
            }
        }
        result
    }

    fn resolve_all(&self, ids: Option<&[String]>) -> Vec<&Person> {
        ids.unwrap_or(&[])
            .iter()
            .filter_map(|id| self.person(id))
            .collect()
    }

    // ===== Algorithm Methods =====

    /// Ancestors of a person, tagged with generation distance.
    ///
    /// `None` uses [`DEFAULT_MAX_GENERATIONS`].
    pub fn ancestors(&self, id: &str, max_generations: Option<usize>) -> Vec<GenerationEntry<'_>> {
        algorithms::ancestors(self, id, max_generations)
    }

    /// Descendants of a person, tagged with generation distance.
    ///
    /// `None` uses [`DEFAULT_MAX_GENERATIONS`].
    pub fn descendants(
        &self,
        id: &str,
        max_generations: Option<usize>,
    ) -> Vec<GenerationEntry<'_>> {
        algorithms::descendants(self, id, max_generations)
    }

    /// Shortest kinship path from `a` to `b` and its label.
    pub fn calculate_relationship(&self, a: &str, b: &str) -> Relationship {
        algorithms::calculate_relationship(self, a, b)
    }

    // ===== Export Methods =====

    /// Export the whole dataset as JSON.
    pub fn export_json(&self) -> Result<String> {
        crate::export::export_json(self)
    }

    /// Export a nested ancestor tree rooted at `id` as JSON.
    pub fn export_pedigree_json(&self, id: &str, max_generations: Option<usize>) -> Result<String> {
        crate::export::export_pedigree_json(self, id, max_generations)
    }

    /// Export people and their parent/spouse edges as Graphviz DOT.
    pub fn export_dot(&self) -> Result<String> {
        crate::export::export_dot(self)
    }
}

impl Default for FamilyGraph {
    fn default() -> Self {
        Self::empty()
    }
}

fn build_index<'a>(ids: impl Iterator<Item = &'a str>, kind: &str) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (pos, id) in ids.enumerate() {
        if index.contains_key(id) {
            warn!("Duplicate {kind} id {id}; keeping first definition");
            continue;
        }
        index.insert(id.to_string(), pos);
    }
    index
}
