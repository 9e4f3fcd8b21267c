use std::collections::HashMap;

use serde::Deserialize;

use super::error::{Result, ScrollSyncError};

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub order: usize,
    pub label: String,
    /// Appended to the base page title while this section is active.
    pub title_suffix: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// What paging past the first or last section does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    #[default]
    Stop,
    Wrap,
}

/// Ordered, fixed catalog of the page's navigable sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl SectionRegistry {
    /// Builds the registry from `(id, label, title_suffix)` entries in document
    /// order. Fails on an empty list or a duplicated id.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S, Option<S>)>,
        S: Into<String>,
    {
        let mut sections = Vec::new();
        let mut index = HashMap::new();

        for (order, (id, label, title_suffix)) in entries.into_iter().enumerate() {
            let id = id.into();
            if id.is_empty() {
                return Err(ScrollSyncError::Config(format!(
                    "section at position {} has an empty id",
                    order
                )));
            }
            if index.insert(id.clone(), order).is_some() {
                return Err(ScrollSyncError::Config(format!(
                    "duplicate section id: {}",
                    id
                )));
            }
            sections.push(Section {
                id,
                order,
                label: label.into(),
                title_suffix: title_suffix.map(Into::into),
            });
        }

        if sections.is_empty() {
            return Err(ScrollSyncError::Config(
                "at least one section is required".to_string(),
            ));
        }

        Ok(Self { sections, index })
    }

    pub fn all(&self) -> &[Section] {
        &self.sections
    }

    pub fn first(&self) -> &Section {
        &self.sections[0]
    }

    pub fn last(&self) -> &Section {
        &self.sections[self.sections.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.index.get(id).map(|&i| &self.sections[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ScrollSyncError::unknown(id))
    }

    /// Adjacent section without wraparound. `None` at either end and for
    /// unregistered ids.
    pub fn neighbor(&self, id: &str, direction: Direction) -> Option<&Section> {
        self.neighbor_with(id, direction, Boundary::Stop)
    }

    pub fn neighbor_with(
        &self,
        id: &str,
        direction: Direction,
        boundary: Boundary,
    ) -> Option<&Section> {
        let i = *self.index.get(id)?;
        let len = self.sections.len();
        let target = match (direction, boundary) {
            (Direction::Next, _) if i + 1 < len => i + 1,
            (Direction::Previous, _) if i > 0 => i - 1,
            // A single section never wraps onto itself.
            (_, Boundary::Wrap) if len > 1 => match direction {
                Direction::Next => 0,
                Direction::Previous => len - 1,
            },
            _ => return None,
        };
        self.sections.get(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn bald_sections() -> SectionRegistry {
        SectionRegistry::new([
            ("home", "Home", None),
            ("public-good", "Public Good", Some("Public Good")),
            ("distribution", "Distribution", Some("Distribution")),
            ("progress", "Progress", Some("Progress Tracker")),
        ])
        .unwrap()
    }

    #[test]
    fn all_is_ordered_and_restartable() {
        let registry = bald_sections();
        let first: Vec<_> = registry.all().iter().map(|s| s.id.as_str()).collect();
        let second: Vec<_> = registry.all().iter().map(|s| s.order).collect();
        assert_eq!(first, vec!["home", "public-good", "distribution", "progress"]);
        assert_eq!(second, vec![0, 1, 2, 3]);
    }

    #[test]
    fn index_of_unknown_section_fails() {
        let registry = bald_sections();
        assert_eq!(
            registry.index_of("roadmap"),
            Err(ScrollSyncError::UnknownSection("roadmap".to_string()))
        );
    }

    #[test]
    fn neighbor_stops_at_boundaries() {
        let registry = bald_sections();
        assert_eq!(registry.neighbor("home", Direction::Previous), None);
        assert_eq!(registry.neighbor("progress", Direction::Next), None);
        assert_eq!(
            registry.neighbor("home", Direction::Next).map(|s| s.id.as_str()),
            Some("public-good")
        );
        assert_eq!(
            registry
                .neighbor("progress", Direction::Previous)
                .map(|s| s.id.as_str()),
            Some("distribution")
        );
    }

    #[test]
    fn neighbor_of_unknown_section_is_none() {
        let registry = bald_sections();
        assert_eq!(registry.neighbor("nope", Direction::Next), None);
    }

    #[test]
    fn wrap_boundary_cycles() {
        let registry = bald_sections();
        assert_eq!(
            registry
                .neighbor_with("progress", Direction::Next, Boundary::Wrap)
                .map(|s| s.id.as_str()),
            Some("home")
        );
        assert_eq!(
            registry
                .neighbor_with("home", Direction::Previous, Boundary::Wrap)
                .map(|s| s.id.as_str()),
            Some("progress")
        );
    }

    #[test]
    fn single_section_never_wraps() {
        let registry = SectionRegistry::new([("home", "Home", None)]).unwrap();
        assert_eq!(
            registry.neighbor_with("home", Direction::Next, Boundary::Wrap),
            None
        );
    }

    #[test]
    fn rejects_duplicates_and_empty_lists() {
        let dup = SectionRegistry::new([("home", "Home", None), ("home", "Again", None)]);
        assert!(matches!(dup, Err(ScrollSyncError::Config(_))));

        let empty = SectionRegistry::new(Vec::<(&str, &str, Option<&str>)>::new());
        assert!(matches!(empty, Err(ScrollSyncError::Config(_))));
    }

    proptest! {
        #[test]
        fn index_of_is_stable_and_unique(ids in prop::collection::hash_set("[a-z]{1,8}", 1..12)) {
            let ids: Vec<String> = ids.into_iter().collect();
            let registry = SectionRegistry::new(
                ids.iter().map(|id| (id.clone(), id.clone(), None)),
            ).unwrap();

            let mut seen = std::collections::HashSet::new();
            for (expected, id) in ids.iter().enumerate() {
                let index = registry.index_of(id).unwrap();
                prop_assert_eq!(index, expected);
                prop_assert_eq!(registry.index_of(id).unwrap(), index);
                prop_assert!(seen.insert(index));
            }
        }

        #[test]
        fn unregistered_ids_fail_lookup(id in "[A-Z]{1,8}") {
            let registry = bald_sections();
            prop_assert!(registry.index_of(&id).is_err());
            prop_assert!(registry.neighbor(&id, Direction::Next).is_none());
            prop_assert!(registry.neighbor(&id, Direction::Previous).is_none());
        }
    }
}
