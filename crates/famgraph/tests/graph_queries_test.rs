//! Integration tests for linking, traversal and search over a family graph.
//!
//! Tests cover:
//! - Bidirectional parent/child links, idempotent relinking
//! - Mutual spouse links carrying marriage data
//! - Cycle-safe ancestor traversal
//! - Generation bounds on descendant traversal
//! - Case-insensitive search
//! - Total queries on unknown ids and empty graphs

use famgraph::{
    helpers, link_families, DateValue, Event, EventKind, FamilyData, FamilyGraph, Sex,
};

// Three generations: GF+GM -> F (+M) -> C1, C2; F's sister A
fn create_three_generations() -> famgraph::Result<FamilyData> {
    let mut data = FamilyData::default();

    helpers::add_person(&mut data, "GF", "George /Lathrop/", Sex::Male)?;
    helpers::add_person(&mut data, "GM", "Grace /Hill/", Sex::Female)?;
    helpers::add_person(&mut data, "F", "Frank /Lathrop/", Sex::Male)?;
    helpers::add_person(&mut data, "A", "Alice /Lathrop/", Sex::Female)?;
    helpers::add_person(&mut data, "M", "Mary /Cole/", Sex::Female)?;
    helpers::add_person(&mut data, "C1", "William /Lathrop/", Sex::Male)?;
    helpers::add_person(&mut data, "C2", "Sarah /Lathrop/", Sex::Female)?;

    let f1 = helpers::add_family(&mut data, "F1", Some("GF"), Some("GM"), &["F", "A"])?;
    f1.marriage = Some(Event::new(EventKind::Marriage).with_date(DateValue::from_year(1850)));
    helpers::add_family(&mut data, "F2", Some("F"), Some("M"), &["C1", "C2"])?;

    Ok(data)
}

fn ids(people: &[&famgraph::Person]) -> Vec<String> {
    people.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn test_round_trip_linkage_is_idempotent() {
    let mut data = create_three_generations().unwrap();
    link_families(&mut data);
    link_families(&mut data);

    for family in &data.families {
        for child_id in &family.children {
            let child = data.people.iter().find(|p| &p.id == child_id).unwrap();
            for parent_id in family.spouses() {
                let parent = data.people.iter().find(|p| &p.id == parent_id).unwrap();
                assert_eq!(child.parents.iter().filter(|id| *id == parent_id).count(), 1);
                assert_eq!(parent.children.iter().filter(|id| *id == child_id).count(), 1);
            }
        }
    }
}

#[test]
fn test_mutual_spousehood_carries_marriage() {
    let graph = helpers::build_graph(create_three_generations().unwrap());

    let gf = graph.spouse_links("GF");
    let gm = graph.spouse_links("GM");
    assert_eq!(gf.len(), 1);
    assert_eq!(gm.len(), 1);
    assert_eq!(gf[0].spouse_id, "GM");
    assert_eq!(gm[0].spouse_id, "GF");
    assert_eq!(gf[0].family_id.as_deref(), Some("F1"));
    assert_eq!(gf[0].marriage.as_ref().and_then(Event::year), Some(1850));
    assert_eq!(gm[0].marriage, gf[0].marriage);
}

#[test]
fn test_one_hop_projections() {
    let graph = helpers::build_graph(create_three_generations().unwrap());

    assert_eq!(ids(&graph.parents("C1")), vec!["F", "M"]);
    assert_eq!(ids(&graph.children("F")), vec!["C1", "C2"]);
    assert_eq!(ids(&graph.siblings("C1")), vec!["C2"]);
    assert_eq!(ids(&graph.spouses("F")), vec!["M"]);
}

#[test]
fn test_ancestors_in_generation_order() {
    let graph = helpers::build_graph(create_three_generations().unwrap());

    let ancestors = graph.ancestors("C1", None);
    let found: Vec<_> = ancestors
        .iter()
        .map(|e| (e.person.id.as_str(), e.generation))
        .collect();
    assert_eq!(found, vec![("F", 1), ("GF", 2), ("GM", 2), ("M", 1)]);
}

#[test]
fn test_cycle_safety() {
    // A's parent is B and B's parent is A
    let mut data = FamilyData::default();
    helpers::add_person(&mut data, "A", "A", Sex::Male).unwrap();
    helpers::add_person(&mut data, "B", "B", Sex::Male).unwrap();
    helpers::add_family(&mut data, "F1", Some("B"), None, &["A"]).unwrap();
    helpers::add_family(&mut data, "F2", Some("A"), None, &["B"]).unwrap();
    let graph = helpers::build_graph(data);

    let ancestors = graph.ancestors("A", Some(10));
    assert_eq!(ancestors.len(), 1);
    assert_eq!(ancestors[0].person.id, "B");

    let descendants = graph.descendants("A", Some(10));
    assert_eq!(descendants.len(), 1);
}

#[test]
fn test_generation_bound() {
    // P0 -> P1 -> ... -> P5
    let mut data = FamilyData::default();
    for i in 0..6 {
        helpers::add_person(&mut data, &format!("P{i}"), &format!("Person {i}"), Sex::Male)
            .unwrap();
    }
    for i in 0..5 {
        let parent = format!("P{i}");
        let child = format!("P{}", i + 1);
        helpers::add_family(&mut data, &format!("F{i}"), Some(parent.as_str()), None, &[child.as_str()])
            .unwrap();
    }
    let graph = helpers::build_graph(data);

    let bounded = graph.descendants("P0", Some(2));
    assert_eq!(bounded.len(), 2);
    assert!(bounded.iter().all(|e| e.generation <= 2));

    assert_eq!(graph.descendants("P0", None).len(), 5);
    assert!(graph.descendants("P0", Some(0)).is_empty());
}

#[test]
fn test_search() {
    let graph = helpers::build_graph(create_three_generations().unwrap());

    let found = graph.search_people("lathrop");
    assert_eq!(ids(&found), vec!["GF", "F", "A", "C1", "C2"]);

    // Given name alone
    assert_eq!(ids(&graph.search_people("WILL")), vec!["C1"]);
    // Substring of a surname
    assert_eq!(ids(&graph.search_people("col")), vec!["M"]);
    assert!(graph.search_people("zzz").is_empty());

    // Spaces are part of the query, not trimmed away
    assert_eq!(ids(&graph.search_people("m L")), vec!["C1"]);
    assert!(graph.search_people(" lathrop ").is_empty());
}

// P has A with M1 (F1) and B with M2 (F2)
fn create_half_siblings(extra_full_sibling: bool) -> FamilyGraph {
    let mut data = FamilyData::default();
    helpers::add_person(&mut data, "P", "Paul /Lathrop/", Sex::Male).unwrap();
    helpers::add_person(&mut data, "M1", "Mary /Cole/", Sex::Female).unwrap();
    helpers::add_person(&mut data, "M2", "Martha /Hale/", Sex::Female).unwrap();
    helpers::add_person(&mut data, "A", "Anne /Lathrop/", Sex::Female).unwrap();
    helpers::add_person(&mut data, "B", "Ben /Lathrop/", Sex::Male).unwrap();

    let mut first_marriage = vec!["A"];
    if extra_full_sibling {
        helpers::add_person(&mut data, "A2", "Amos /Lathrop/", Sex::Male).unwrap();
        first_marriage.push("A2");
    }
    helpers::add_family(&mut data, "F1", Some("P"), Some("M1"), &first_marriage).unwrap();
    helpers::add_family(&mut data, "F2", Some("P"), Some("M2"), &["B"]).unwrap();
    helpers::build_graph(data)
}

#[test]
fn test_siblings_include_half_siblings() {
    let graph = create_half_siblings(false);
    assert_eq!(ids(&graph.siblings("A")), vec!["B"]);
    assert_eq!(ids(&graph.siblings("B")), vec!["A"]);

    // A2 shares both parents with A and is listed once
    let graph = create_half_siblings(true);
    assert_eq!(ids(&graph.siblings("A")), vec!["A2", "B"]);
    assert_eq!(ids(&graph.siblings("B")), vec!["A", "A2"]);
    assert_eq!(ids(&graph.siblings("A2")), vec!["A", "B"]);
}

#[test]
fn test_queries_on_empty_graph_are_total() {
    let graph = FamilyGraph::empty();

    assert!(graph.person("I1").is_none());
    assert!(graph.people().is_empty());
    assert!(graph.search_people("smith").is_empty());
    assert!(graph.ancestors("I1", None).is_empty());
    assert!(graph.descendants("I1", None).is_empty());
    assert!(graph.timeline_events().is_empty());
    assert!(!graph.calculate_relationship("I1", "I2").is_related());
}
