//! Chronological life events across the whole graph.

use super::family_graph::FamilyGraph;
use crate::model::{DateValue, Event, Person, PersonId, Sex};
use serde::{Deserialize, Serialize};

/// Which events a timeline entry can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineKind {
    /// A person's birth
    Birth,
    /// A person's death
    Death,
    /// A couple's marriage
    Marriage,
}

/// How marriages are attributed to people on the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarriageAttribution {
    /// Emit a marriage only from the spouse recorded as male.
    ///
    /// Marriages where neither spouse is male are not emitted.
    #[default]
    MaleSpouse,
    /// Emit exactly one marriage per family, attributed to the husband slot
    /// when set, otherwise to the wife.
    OncePerFamily,
}

/// One dated entry on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Year of the event; entries without a known year are never emitted
    pub year: i32,
    /// What happened
    pub kind: TimelineKind,
    /// Person the event is attributed to
    pub person_id: PersonId,
    /// The other spouse, for marriages
    pub spouse_id: Option<PersonId>,
    /// Full date as parsed
    pub date: Option<DateValue>,
    /// Place, if recorded
    pub place: Option<String>,
    /// Short human-readable description
    pub description: String,
}

impl TimelineEvent {
    fn from_event(
        kind: TimelineKind,
        person: &Person,
        spouse: Option<&Person>,
        event: &Event,
    ) -> Option<Self> {
        let year = event.year()?;
        let description = match (kind, spouse) {
            (TimelineKind::Birth, _) => format!("Birth of {}", person.display_name()),
            (TimelineKind::Death, _) => format!("Death of {}", person.display_name()),
            (TimelineKind::Marriage, Some(spouse)) => format!(
                "Marriage of {} and {}",
                person.display_name(),
                spouse.display_name()
            ),
            (TimelineKind::Marriage, None) => format!("Marriage of {}", person.display_name()),
        };

        Some(Self {
            year,
            kind,
            person_id: person.id.clone(),
            spouse_id: spouse.map(|s| s.id.clone()),
            date: event.date.clone(),
            place: event.place.clone(),
            description,
        })
    }
}

impl FamilyGraph {
    /// Births, deaths and marriages with a known year, oldest first.
    ///
    /// Uses [`MarriageAttribution::MaleSpouse`].
    pub fn timeline_events(&self) -> Vec<TimelineEvent> {
        self.timeline_events_with(MarriageAttribution::default())
    }

    /// Timeline with an explicit marriage attribution policy.
    ///
    /// Entries are sorted by date; ties keep the order people (and then
    /// families) appear in the load.
    pub fn timeline_events_with(&self, attribution: MarriageAttribution) -> Vec<TimelineEvent> {
        let mut events = Vec::new();

        for person in self.people() {
            if let Some(birth) = person.birth() {
                events.extend(TimelineEvent::from_event(
                    TimelineKind::Birth,
                    person,
                    None,
                    birth,
                ));
            }
            if let Some(death) = person.death() {
                events.extend(TimelineEvent::from_event(
                    TimelineKind::Death,
                    person,
                    None,
                    death,
                ));
            }

            if attribution == MarriageAttribution::MaleSpouse && person.sex == Sex::Male {
                for link in &person.spouses {
                    let Some(marriage) = &link.marriage else {
                        continue;
                    };
                    events.extend(TimelineEvent::from_event(
                        TimelineKind::Marriage,
                        person,
                        self.person(&link.spouse_id),
                        marriage,
                    ));
                }
            }
        }

        if attribution == MarriageAttribution::OncePerFamily {
            for family in self.families() {
                let Some(marriage) = &family.marriage else {
                    continue;
                };
                let husband = family.husband.as_deref().and_then(|id| self.person(id));
                let wife = family.wife.as_deref().and_then(|id| self.person(id));
                let (subject, spouse) = match (husband, wife) {
                    (Some(h), w) => (h, w),
                    (None, Some(w)) => (w, None),
                    (None, None) => continue,
                };
                events.extend(TimelineEvent::from_event(
                    TimelineKind::Marriage,
                    subject,
                    spouse,
                    marriage,
                ));
            }
        }

        events.sort_by_key(|event| {
            event
                .date
                .as_ref()
                .map(DateValue::sort_key)
                .unwrap_or((event.year, 0, 0))
        });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers;
    use crate::model::{EventKind, FamilyData};

    fn dated(kind: EventKind, year: i32) -> Event {
        Event::new(kind).with_date(DateValue::from_year(year))
    }

    fn graph_with_marriage(husband_sex: Sex) -> FamilyGraph {
        let mut data = FamilyData::default();
        helpers::add_person(&mut data, "A", "Alex /Doe/", husband_sex).unwrap();
        helpers::add_person(&mut data, "B", "Bea /Roe/", Sex::Female).unwrap();
        data.people[0].events.push(dated(EventKind::Birth, 1900));
        data.people[1].events.push(dated(EventKind::Birth, 1890));
        data.people[1].events.push(dated(EventKind::Death, 1950));
        helpers::add_family(&mut data, "F1", Some("A"), Some("B"), &[]).unwrap();
        data.families[0].marriage = Some(dated(EventKind::Marriage, 1920));
        helpers::build_graph(data)
    }

    #[test]
    fn test_timeline_sorted_with_single_marriage() {
        let graph = graph_with_marriage(Sex::Male);
        let events = graph.timeline_events();
        let years: Vec<_> = events.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![1890, 1900, 1920, 1950]);

        let marriages: Vec<_> = events
            .iter()
            .filter(|e| e.kind == TimelineKind::Marriage)
            .collect();
        assert_eq!(marriages.len(), 1);
        assert_eq!(marriages[0].person_id, "A");
        assert_eq!(marriages[0].spouse_id.as_deref(), Some("B"));
    }

    #[test]
    fn test_marriage_without_male_spouse_is_skipped_by_default() {
        let graph = graph_with_marriage(Sex::Unknown);
        assert!(graph
            .timeline_events()
            .iter()
            .all(|e| e.kind != TimelineKind::Marriage));

        let once = graph.timeline_events_with(MarriageAttribution::OncePerFamily);
        assert_eq!(
            once.iter()
                .filter(|e| e.kind == TimelineKind::Marriage)
                .count(),
            1
        );
    }

    #[test]
    fn test_undated_events_are_omitted() {
        let mut data = FamilyData::default();
        helpers::add_person(&mut data, "A", "Alex /Doe/", Sex::Male).unwrap();
        data.people[0].events.push(
            Event::new(EventKind::Birth).with_date(DateValue::unparsed("sometime")),
        );
        let graph = helpers::build_graph(data);
        assert!(graph.timeline_events().is_empty());
    }
}
