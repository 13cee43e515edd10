//! Query builder for fluent person queries.
//!
//! Filters are combined with AND and applied in load order.

use crate::graph::FamilyGraph;
use crate::model::{EventKind, Person, Sex};

/// A filter predicate that can be applied to people.
type FilterFn = Box<dyn Fn(&Person) -> bool>;

/// Fluent query builder over the people of a [`FamilyGraph`].
///
/// # Examples
///
/// ```
/// use famgraph::{helpers, FamilyData, Sex};
///
/// # fn example() -> famgraph::Result<()> {
/// let mut data = FamilyData::default();
/// helpers::add_person(&mut data, "I1", "John /Smith/", Sex::Male)?;
/// helpers::add_person(&mut data, "I2", "Jane /Smith/", Sex::Female)?;
/// let graph = helpers::build_graph(data);
///
/// let smith_women = graph.query()
///     .surname("smith")
///     .sex(Sex::Female)
///     .execute();
/// assert_eq!(smith_women.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct PersonQuery<'a> {
    graph: &'a FamilyGraph,
    filters: Vec<FilterFn>,
    limit_value: Option<usize>,
}

impl<'a> PersonQuery<'a> {
    /// Create a new query over the given graph.
    pub fn new(graph: &'a FamilyGraph) -> Self {
        Self {
            graph,
            filters: Vec::new(),
            limit_value: None,
        }
    }

    /// Filter people by sex.
    pub fn sex(mut self, sex: Sex) -> Self {
        self.filters.push(Box::new(move |person| person.sex == sex));
        self
    }

    /// Filter people by exact surname (case-insensitive).
    pub fn surname(mut self, surname: &str) -> Self {
        let surname = surname.trim().to_lowercase();
        self.filters.push(Box::new(move |person| {
            person
                .name
                .surname
                .as_deref()
                .is_some_and(|s| s.trim().to_lowercase() == surname)
        }));
        self
    }

    /// Filter people whose full name contains a substring (case-insensitive).
    pub fn name_contains(mut self, substring: &str) -> Self {
        let substring = substring.to_lowercase();
        self.filters.push(Box::new(move |person| {
            person.name.full.to_lowercase().contains(&substring)
        }));
        self
    }

    /// Filter people born in `from..=to`. People without a birth year never match.
    pub fn born_between(mut self, from: i32, to: i32) -> Self {
        self.filters.push(Box::new(move |person| {
            person
                .birth_year()
                .is_some_and(|year| (from..=to).contains(&year))
        }));
        self
    }

    /// Filter people having at least one event of the given kind.
    pub fn has_event(mut self, kind: EventKind) -> Self {
        self.filters
            .push(Box::new(move |person| person.event(&kind).is_some()));
        self
    }

    /// Filter people using a custom predicate function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use famgraph::FamilyGraph;
    /// # let graph = FamilyGraph::empty();
    /// // People with recorded occupations
    /// let workers = graph.query()
    ///     .custom(|person| !person.occupations.is_empty())
    ///     .execute();
    /// # assert!(workers.is_empty());
    /// ```
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Person) -> bool + 'static,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Limit the number of results returned.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_value = Some(n);
        self
    }

    /// Execute the query and return matching people.
    pub fn execute(&self) -> Vec<&'a Person> {
        let limit = self.limit_value.unwrap_or(usize::MAX);
        self.graph
            .people()
            .iter()
            .filter(|person| self.matches_filters(person))
            .take(limit)
            .collect()
    }

    /// Count the number of matching people without allocating a result vector.
    pub fn count(&self) -> usize {
        self.graph
            .people()
            .iter()
            .filter(|person| self.matches_filters(person))
            .count()
    }

    /// Check if anyone matches the query (short-circuits on first match).
    pub fn exists(&self) -> bool {
        self.graph
            .people()
            .iter()
            .any(|person| self.matches_filters(person))
    }

    /// First matching person.
    pub fn first(&self) -> Option<&'a Person> {
        self.graph
            .people()
            .iter()
            .find(|person| self.matches_filters(person))
    }

    /// Check if a person matches all filters.
    fn matches_filters(&self, person: &Person) -> bool {
        self.filters.iter().all(|filter| filter(person))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers;
    use crate::model::{DateValue, Event, FamilyData};

    fn graph() -> FamilyGraph {
        let mut data = FamilyData::default();
        helpers::add_person(&mut data, "I1", "John /Smith/", Sex::Male).unwrap();
        helpers::add_person(&mut data, "I2", "Mary /Smith/", Sex::Female).unwrap();
        helpers::add_person(&mut data, "I3", "Peter /Brown/", Sex::Male).unwrap();
        data.people[0]
            .events
            .push(Event::new(EventKind::Birth).with_date(DateValue::from_year(1880)));
        data.people[1]
            .events
            .push(Event::new(EventKind::Birth).with_date(DateValue::from_year(1885)));
        data.people[2]
            .events
            .push(Event::new(EventKind::Burial).with_place("Boston"));
        helpers::build_graph(data)
    }

    #[test]
    fn test_filters_combine() {
        let graph = graph();
        let result = graph.query().surname("SMITH").sex(Sex::Male).execute();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "I1");
    }

    #[test]
    fn test_born_between_and_limit() {
        let graph = graph();
        assert_eq!(graph.query().born_between(1870, 1890).count(), 2);
        assert_eq!(graph.query().born_between(1870, 1890).limit(1).execute().len(), 1);
        assert!(!graph.query().born_between(1900, 1950).exists());
    }

    #[test]
    fn test_has_event_and_custom() {
        let graph = graph();
        let buried = graph.query().has_event(EventKind::Burial).first();
        assert_eq!(buried.map(|p| p.id.as_str()), Some("I3"));

        let named_j = graph
            .query()
            .custom(|p| p.name.given.as_deref().is_some_and(|g| g.starts_with('J')))
            .count();
        assert_eq!(named_j, 1);
    }

    #[test]
    fn test_empty_query_matches_everyone() {
        let graph = graph();
        assert_eq!(graph.query().count(), 3);
        assert_eq!(graph.query().name_contains("ar").count(), 1);
    }
}
