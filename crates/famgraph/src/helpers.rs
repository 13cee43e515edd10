//! Convenience helpers for building family data by hand.
//!
//! Parsers produce [`FamilyData`] directly; these helpers cover tests, demos
//! and callers assembling small trees in code.

use crate::error::{GraphError, Result};
use crate::graph::FamilyGraph;
use crate::linker::link_families;
use crate::model::{Event, Family, FamilyData, Person, PersonName, Sex};

/// Add a person with a `Given /Surname/` style name.
///
/// # Errors
///
/// [`GraphError::InvalidOperation`] if the id is already taken.
pub fn add_person<'a>(
    data: &'a mut FamilyData,
    id: &str,
    name: &str,
    sex: Sex,
) -> Result<&'a mut Person> {
    if data.people.iter().any(|p| p.id == id) {
        return Err(GraphError::invalid(format!("Duplicate person id {id}")));
    }
    data.people
        .push(Person::new(id, PersonName::parse_slashed(name), sex));
    let last = data.people.len() - 1;
    Ok(&mut data.people[last])
}

/// Add a family record. People referenced need not exist yet.
///
/// # Errors
///
/// [`GraphError::InvalidOperation`] if the id is already taken.
pub fn add_family<'a>(
    data: &'a mut FamilyData,
    id: &str,
    husband: Option<&str>,
    wife: Option<&str>,
    children: &[&str],
) -> Result<&'a mut Family> {
    if data.families.iter().any(|f| f.id == id) {
        return Err(GraphError::invalid(format!("Duplicate family id {id}")));
    }
    let mut family = Family::new(id);
    family.husband = husband.map(str::to_string);
    family.wife = wife.map(str::to_string);
    family.children = children.iter().map(|c| c.to_string()).collect();
    data.families.push(family);
    let last = data.families.len() - 1;
    Ok(&mut data.families[last])
}

/// Attach an event to an existing person.
///
/// # Errors
///
/// [`GraphError::PersonNotFound`] if no person has that id.
pub fn add_event(data: &mut FamilyData, person_id: &str, event: Event) -> Result<()> {
    let person = data
        .people
        .iter_mut()
        .find(|p| p.id == person_id)
        .ok_or_else(|| GraphError::PersonNotFound {
            person_id: person_id.to_string(),
        })?;
    person.events.push(event);
    Ok(())
}

/// Link and index `data` into a standalone graph.
pub fn build_graph(mut data: FamilyData) -> FamilyGraph {
    link_families(&mut data);
    FamilyGraph::new(data)
}
