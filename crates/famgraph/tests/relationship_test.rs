//! Integration tests for relationship search and kinship labels.

use famgraph::{helpers, FamilyData, FamilyGraph, Kinship, Sex, StepKind};

// Two branches from one couple, four generations deep:
//
//   GA + GB
//    ├── P1 + S1 ── C1 ── D1
//    └── P2 ──────── C2 ── D2
//
// X is unconnected.
fn create_extended_family() -> FamilyGraph {
    let mut data = FamilyData::default();
    for (id, sex) in [
        ("GA", Sex::Male),
        ("GB", Sex::Female),
        ("P1", Sex::Male),
        ("S1", Sex::Female),
        ("P2", Sex::Female),
        ("C1", Sex::Male),
        ("C2", Sex::Female),
        ("D1", Sex::Male),
        ("D2", Sex::Female),
        ("X", Sex::Unknown),
    ] {
        helpers::add_person(&mut data, id, id, sex).unwrap();
    }
    helpers::add_family(&mut data, "F1", Some("GA"), Some("GB"), &["P1", "P2"]).unwrap();
    helpers::add_family(&mut data, "F2", Some("P1"), Some("S1"), &["C1"]).unwrap();
    helpers::add_family(&mut data, "F3", None, Some("P2"), &["C2"]).unwrap();
    helpers::add_family(&mut data, "F4", Some("C1"), None, &["D1"]).unwrap();
    helpers::add_family(&mut data, "F5", None, Some("C2"), &["D2"]).unwrap();
    helpers::build_graph(data)
}

fn label(graph: &FamilyGraph, a: &str, b: &str) -> String {
    graph.calculate_relationship(a, b).label()
}

#[test]
fn test_full_siblings() {
    let graph = create_extended_family();
    assert_eq!(label(&graph, "P1", "P2"), "Sibling");
}

#[test]
fn test_grandparent_both_directions() {
    let graph = create_extended_family();
    assert_eq!(label(&graph, "C1", "GA"), "Grandchild");
    assert_eq!(label(&graph, "GA", "C1"), "Grandparent");
    assert_eq!(label(&graph, "GA", "D1"), "Great-grandparent");
    assert_eq!(label(&graph, "D2", "GB"), "Great-grandchild");
}

#[test]
fn test_parent_child_and_spouse() {
    let graph = create_extended_family();
    assert_eq!(label(&graph, "P1", "C1"), "Parent");
    assert_eq!(label(&graph, "C1", "S1"), "Child");
    assert_eq!(label(&graph, "P1", "S1"), "Spouse");
}

#[test]
fn test_collateral_labels() {
    let graph = create_extended_family();
    assert_eq!(label(&graph, "P2", "C1"), "Aunt/Uncle");
    assert_eq!(label(&graph, "C1", "P2"), "Niece/Nephew");
    assert_eq!(label(&graph, "C1", "C2"), "First cousin");
    assert_eq!(label(&graph, "C1", "D2"), "1st cousin 1x removed");
    assert_eq!(label(&graph, "D1", "D2"), "2nd cousin");
}

#[test]
fn test_same_person_is_self() {
    let graph = create_extended_family();
    let rel = graph.calculate_relationship("C1", "C1");
    assert_eq!(rel.kind, Kinship::SelfPerson);
    assert_eq!(rel.label(), "Self");
    assert_eq!(rel.path.len(), 1);
    assert_eq!(rel.steps(), 0);
}

#[test]
fn test_no_relationship() {
    let graph = create_extended_family();
    let rel = graph.calculate_relationship("C1", "X");
    assert_eq!(rel.label(), "No relationship found");
    assert!(rel.path.is_empty());
    assert!(!rel.is_related());

    // Unknown ids degrade the same way
    assert!(graph.calculate_relationship("C1", "missing").path.is_empty());
}

#[test]
fn test_path_is_shortest_and_annotated() {
    let graph = create_extended_family();
    let rel = graph.calculate_relationship("C1", "C2");
    let people: Vec<_> = rel.path.iter().map(|s| s.person_id.as_str()).collect();
    assert_eq!(people, vec!["C1", "P1", "GA", "P2", "C2"]);

    let steps: Vec<_> = rel.path.iter().map(|s| s.via).collect();
    assert_eq!(
        steps,
        vec![
            None,
            Some(StepKind::ChildOf),
            Some(StepKind::ChildOf),
            Some(StepKind::ParentOf),
            Some(StepKind::ParentOf),
        ]
    );
}

#[test]
fn test_spouse_edges_in_path() {
    let mut data = FamilyData::default();
    helpers::add_person(&mut data, "H", "H", Sex::Male).unwrap();
    helpers::add_person(&mut data, "W", "W", Sex::Female).unwrap();
    helpers::add_person(&mut data, "K", "K", Sex::Male).unwrap();
    helpers::add_family(&mut data, "F1", Some("H"), Some("W"), &[]).unwrap();
    // K is W's child from another family
    helpers::add_family(&mut data, "F2", None, Some("W"), &["K"]).unwrap();
    let graph = helpers::build_graph(data);

    assert_eq!(label(&graph, "H", "K"), "Parent's spouse");
    assert_eq!(label(&graph, "K", "H"), "Spouse's child");
}
