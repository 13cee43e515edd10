//! Graph linker: turns family records into person-to-person edges.
//!
//! After [`link_families`] runs, every parent→child edge has its child→parent
//! counterpart and every spouse link is mutual. All appends are keyed by id,
//! so linking the same data twice changes nothing.

use crate::model::{FamilyData, Person, Sex, SpouseLink};
use log::{debug, warn};
use std::collections::HashMap;

/// Counters describing what a linking pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Parent/child edge pairs created
    pub parent_links: usize,
    /// Spouse edge pairs created
    pub spouse_links: usize,
    /// Family memberships added from the person side (FAMC/FAMS)
    pub reconciled: usize,
    /// References to ids that do not exist
    pub dangling: usize,
}

/// Populate `parents`, `children` and `spouses` on every person from the families.
///
/// Runs in two steps:
/// 1. Reconcile: a person's `child_of_families` / `spouse_of_families` entry
///    pointing at a family that does not list them adds them to that family.
/// 2. Link: walk each family, creating mutual spouse links for the couple and
///    parent/child links between each spouse and each child.
///
/// References to unknown people are skipped for that side only.
pub fn link_families(data: &mut FamilyData) -> LinkStats {
    let mut stats = LinkStats::default();

    let person_index = index_people(&data.people);
    reconcile_memberships(data, &mut stats);

    for family in &data.families {
        let husband = resolve(&person_index, family.husband.as_deref(), &family.id, &mut stats);
        let wife = resolve(&person_index, family.wife.as_deref(), &family.id, &mut stats);

        if let (Some(h), Some(w)) = (husband, wife) {
            if h != w {
                let h_id = data.people[h].id.clone();
                let w_id = data.people[w].id.clone();
                let added_h = add_spouse(&mut data.people[h], &w_id, family);
                let added_w = add_spouse(&mut data.people[w], &h_id, family);
                if added_h || added_w {
                    stats.spouse_links += 1;
                }
            }
        }

        for child_id in &family.children {
            let Some(&c) = person_index.get(child_id.as_str()) else {
                warn!("Family {} lists unknown child {child_id}", family.id);
                stats.dangling += 1;
                continue;
            };

            for parent in [husband, wife].into_iter().flatten() {
                if parent == c {
                    continue;
                }
                let parent_id = data.people[parent].id.clone();
                let added_up = push_unique(&mut data.people[c].parents, &parent_id);
                let added_down = push_unique(&mut data.people[parent].children, child_id);
                if added_up || added_down {
                    stats.parent_links += 1;
                }
            }
        }
    }

    debug!(
        "Linked {} families: {} parent links, {} spouse links, {} reconciled, {} dangling",
        data.families.len(),
        stats.parent_links,
        stats.spouse_links,
        stats.reconciled,
        stats.dangling
    );

    stats
}

/// Map person id to position; the first definition of an id wins.
fn index_people(people: &[Person]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(people.len());
    for (pos, person) in people.iter().enumerate() {
        index.entry(person.id.clone()).or_insert(pos);
    }
    index
}

fn resolve(
    index: &HashMap<String, usize>,
    id: Option<&str>,
    family_id: &str,
    stats: &mut LinkStats,
) -> Option<usize> {
    let id = id?;
    let found = index.get(id).copied();
    if found.is_none() {
        warn!("Family {family_id} references unknown spouse {id}");
        stats.dangling += 1;
    }
    found
}

fn reconcile_memberships(data: &mut FamilyData, stats: &mut LinkStats) {
    let mut family_index = HashMap::with_capacity(data.families.len());
    for (pos, family) in data.families.iter().enumerate() {
        family_index.entry(family.id.clone()).or_insert(pos);
    }

    for person in &data.people {
        for family_id in &person.child_of_families {
            let Some(&f) = family_index.get(family_id) else {
                stats.dangling += 1;
                continue;
            };
            if push_unique(&mut data.families[f].children, &person.id) {
                debug!("Added {} to children of {family_id} from FAMC", person.id);
                stats.reconciled += 1;
            }
        }

        for family_id in &person.spouse_of_families {
            let Some(&f) = family_index.get(family_id) else {
                stats.dangling += 1;
                continue;
            };
            let family = &mut data.families[f];
            if family.husband.as_deref() == Some(person.id.as_str())
                || family.wife.as_deref() == Some(person.id.as_str())
            {
                continue;
            }

            let slot = match person.sex {
                Sex::Male => &mut family.husband,
                Sex::Female => &mut family.wife,
                Sex::Unknown if family.husband.is_none() => &mut family.husband,
                Sex::Unknown => &mut family.wife,
            };
            if slot.is_none() {
                *slot = Some(person.id.clone());
                debug!("Added {} as spouse in {family_id} from FAMS", person.id);
                stats.reconciled += 1;
            } else {
                warn!(
                    "{} claims spouse role in {family_id} but the slot is taken",
                    person.id
                );
            }
        }
    }
}

fn add_spouse(person: &mut Person, spouse_id: &str, family: &crate::model::Family) -> bool {
    let exists = person
        .spouses
        .iter()
        .any(|s| s.spouse_id == spouse_id && s.family_id.as_deref() == Some(family.id.as_str()));
    if exists {
        return false;
    }
    person.spouses.push(SpouseLink {
        spouse_id: spouse_id.to_string(),
        family_id: Some(family.id.clone()),
        marriage: family.marriage.clone(),
        divorce: family.divorce.clone(),
    });
    true
}

fn push_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        false
    } else {
        list.push(id.to_string());
        true
    }
}
