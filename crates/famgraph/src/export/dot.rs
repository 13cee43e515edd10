//! DOT format export for Graphviz visualization.
//!
//! People become nodes, parent→child edges are solid arrows and spouse edges
//! are dashed lines emitted once per couple.

use crate::error::Result;
use crate::graph::FamilyGraph;
use crate::model::{Person, Sex};
use std::collections::{HashMap, HashSet};

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Node fill colors by sex (hex color codes)
    pub sex_colors: HashMap<Sex, String>,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Append "(birth–death)" years to labels
    pub show_years: bool,
    /// Draw spouse edges
    pub show_spouses: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        let mut sex_colors = HashMap::new();
        sex_colors.insert(Sex::Male, "#90CAF9".to_string());
        sex_colors.insert(Sex::Female, "#F48FB1".to_string());
        sex_colors.insert(Sex::Unknown, "#E0E0E0".to_string());

        DotOptions {
            sex_colors,
            rankdir: "TB".to_string(),
            show_years: true,
            show_spouses: true,
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot(graph: &FamilyGraph) -> Result<String> {
    export_dot_styled(graph, DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
pub fn export_dot_styled(graph: &FamilyGraph, options: DotOptions) -> Result<String> {
    let mut output = String::new();

    output.push_str("digraph family_graph {\n");
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [shape=box, style=filled];\n\n");

    // Node names are positional; raw ids may contain characters DOT rejects
    let node_names: HashMap<&str, String> = graph
        .people()
        .iter()
        .enumerate()
        .map(|(pos, person)| (person.id.as_str(), format!("p{pos}")))
        .collect();

    for person in graph.people() {
        let Some(name) = node_names.get(person.id.as_str()) else {
            continue;
        };
        let label = node_label(person, options.show_years);
        let color = options
            .sex_colors
            .get(&person.sex)
            .map(|s| s.as_str())
            .unwrap_or("#FFFFFF");

        output.push_str(&format!(
            "    {name} [label=\"{label}\", fillcolor=\"{color}\"];\n"
        ));
    }

    output.push('\n');

    for person in graph.people() {
        let Some(child) = node_names.get(person.id.as_str()) else {
            continue;
        };
        for parent_id in &person.parents {
            if let Some(parent) = node_names.get(parent_id.as_str()) {
                output.push_str(&format!("    {parent} -> {child};\n"));
            }
        }
    }

    if options.show_spouses {
        let mut drawn: HashSet<(&str, &str)> = HashSet::new();
        for person in graph.people() {
            for link in &person.spouses {
                let a = person.id.as_str();
                let b = link.spouse_id.as_str();
                let key = if a <= b { (a, b) } else { (b, a) };
                if !drawn.insert(key) {
                    continue;
                }
                if let (Some(from), Some(to)) = (node_names.get(a), node_names.get(b)) {
                    output.push_str(&format!(
                        "    {from} -> {to} [dir=none, style=dashed];\n"
                    ));
                }
            }
        }
    }

    output.push_str("}\n");

    Ok(output)
}

fn node_label(person: &Person, show_years: bool) -> String {
    let mut label = escape_dot_label(person.display_name());
    if show_years {
        let (birth, death) = (person.birth_year(), person.death_year());
        if birth.is_some() || death.is_some() {
            let fmt = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_default();
            label.push_str(&format!("\\n({}-{})", fmt(birth), fmt(death)));
        }
    }
    label
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers;
    use crate::model::{DateValue, Event, EventKind, FamilyData};

    #[test]
    fn test_escape_dot_label() {
        assert_eq!(escape_dot_label("hello"), "hello");
        assert_eq!(escape_dot_label("quote\"here"), "quote\\\"here");
    }

    #[test]
    fn test_export_dot_edges() {
        let mut data = FamilyData::default();
        helpers::add_person(&mut data, "H", "Hal /Doe/", Sex::Male).unwrap();
        helpers::add_person(&mut data, "W", "Wen /Doe/", Sex::Female).unwrap();
        helpers::add_person(&mut data, "C", "Cy /Doe/", Sex::Unknown).unwrap();
        helpers::add_family(&mut data, "F1", Some("H"), Some("W"), &["C"]).unwrap();
        helpers::add_event(
            &mut data,
            "H",
            Event::new(EventKind::Birth).with_date(DateValue::from_year(1900)),
        )
        .unwrap();
        let graph = helpers::build_graph(data);

        let dot = export_dot(&graph).unwrap();
        assert!(dot.starts_with("digraph family_graph {"));
        assert!(dot.contains("p0 -> p2;"));
        assert!(dot.contains("p1 -> p2;"));
        assert_eq!(dot.matches("style=dashed").count(), 1);
        assert!(dot.contains("Hal Doe\\n(1900-)"));
    }
}
