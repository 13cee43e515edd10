//! Aggregate counts over a loaded graph.

use super::family_graph::FamilyGraph;
use crate::model::Sex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary numbers for one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    /// People in the load
    pub people: usize,
    /// Families in the load
    pub families: usize,
    /// Source records
    pub sources: usize,
    /// Media records
    pub media: usize,
    /// Standalone note records
    pub notes: usize,
    /// People recorded as male
    pub males: usize,
    /// People recorded as female
    pub females: usize,
    /// People of unknown sex
    pub unknown_sex: usize,
    /// People with neither parents nor children nor spouses
    pub unconnected: usize,
    /// Earliest year of any person's event
    pub earliest_year: Option<i32>,
    /// Latest year of any person's event
    pub latest_year: Option<i32>,
    /// Number of different surnames
    pub distinct_surnames: usize,
}

impl FamilyGraph {
    /// Compute summary statistics.
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            people: self.person_count(),
            families: self.family_count(),
            sources: self.sources().len(),
            media: self.media().len(),
            notes: self.data().notes.len(),
            distinct_surnames: self.surnames().len(),
            ..Default::default()
        };

        for person in self.people() {
            match person.sex {
                Sex::Male => stats.males += 1,
                Sex::Female => stats.females += 1,
                Sex::Unknown => stats.unknown_sex += 1,
            }
            if person.parents.is_empty() && person.children.is_empty() && person.spouses.is_empty() {
                stats.unconnected += 1;
            }
            for year in person.events.iter().filter_map(|e| e.year()) {
                stats.earliest_year = Some(stats.earliest_year.map_or(year, |y| y.min(year)));
                stats.latest_year = Some(stats.latest_year.map_or(year, |y| y.max(year)));
            }
        }

        stats
    }

    /// Surname → number of people bearing it, ordered by surname.
    ///
    /// People without a surname are not counted.
    pub fn surnames(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for person in self.people() {
            if let Some(surname) = person.name.surname.as_deref().map(str::trim) {
                if !surname.is_empty() {
                    *counts.entry(surname.to_string()).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers;
    use crate::model::{DateValue, Event, EventKind, FamilyData, Sex};

    #[test]
    fn test_statistics() {
        let mut data = FamilyData::default();
        helpers::add_person(&mut data, "I1", "John /Smith/", Sex::Male).unwrap();
        helpers::add_person(&mut data, "I2", "Mary /Jones/", Sex::Female).unwrap();
        helpers::add_person(&mut data, "I3", "Ann /Smith/", Sex::Female).unwrap();
        helpers::add_person(&mut data, "I4", "Loner", Sex::Unknown).unwrap();
        helpers::add_family(&mut data, "F1", Some("I1"), Some("I2"), &["I3"]).unwrap();
        data.people[0]
            .events
            .push(Event::new(EventKind::Birth).with_date(DateValue::from_year(1850)));
        data.people[2]
            .events
            .push(Event::new(EventKind::Death).with_date(DateValue::from_year(1932)));

        let graph = helpers::build_graph(data);
        let stats = graph.statistics();

        assert_eq!(stats.people, 4);
        assert_eq!(stats.families, 1);
        assert_eq!((stats.males, stats.females, stats.unknown_sex), (1, 2, 1));
        assert_eq!(stats.unconnected, 1);
        assert_eq!(stats.earliest_year, Some(1850));
        assert_eq!(stats.latest_year, Some(1932));
        assert_eq!(stats.distinct_surnames, 2);
        assert_eq!(graph.surnames().get("Smith"), Some(&2));
    }
}
