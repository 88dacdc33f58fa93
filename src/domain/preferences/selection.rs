//! The topic selection being edited, before it is saved.

use std::collections::BTreeSet;

use crate::domain::foundation::TopicId;
use crate::domain::preferences::Topic;

/// Working copy of the user's topic choices.
///
/// Initialized from the catalog plus the saved profile, mutated locally by
/// [`toggle`](TopicSelection::toggle) with no I/O, and written back wholesale
/// on save. Discarded on drop; there is no unsaved-changes prompt.
#[derive(Debug, Clone)]
pub struct TopicSelection {
    catalog: Vec<Topic>,
    selected: BTreeSet<TopicId>,
}

impl TopicSelection {
    /// Builds a selection from the catalog and the previously saved set.
    pub fn new(catalog: Vec<Topic>, selected: BTreeSet<TopicId>) -> Self {
        Self { catalog, selected }
    }

    /// The catalog entries to render, in catalog order.
    pub fn catalog(&self) -> &[Topic] {
        &self.catalog
    }

    /// The currently selected topic ids.
    pub fn selected(&self) -> &BTreeSet<TopicId> {
        &self.selected
    }

    /// True if the topic is currently selected.
    pub fn is_selected(&self, id: &TopicId) -> bool {
        self.selected.contains(id)
    }

    /// Flips membership of one topic. Purely local and synchronous.
    pub fn toggle(&mut self, id: &TopicId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tid(s: &str) -> TopicId {
        TopicId::new(s).unwrap()
    }

    fn sample_catalog() -> Vec<Topic> {
        vec![
            Topic::bare(tid("science"), "Science"),
            Topic::bare(tid("technology"), "Technology"),
            Topic::bare(tid("business"), "Business"),
        ]
    }

    #[test]
    fn toggle_adds_missing_topic() {
        let mut selection = TopicSelection::new(sample_catalog(), BTreeSet::new());

        selection.toggle(&tid("science"));

        assert!(selection.is_selected(&tid("science")));
    }

    #[test]
    fn toggle_removes_present_topic() {
        let initial: BTreeSet<_> = [tid("science")].into_iter().collect();
        let mut selection = TopicSelection::new(sample_catalog(), initial);

        selection.toggle(&tid("science"));

        assert!(!selection.is_selected(&tid("science")));
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let initial: BTreeSet<_> = [tid("science")].into_iter().collect();
        let mut selection = TopicSelection::new(sample_catalog(), initial.clone());

        selection.toggle(&tid("technology"));
        selection.toggle(&tid("technology"));

        assert_eq!(selection.selected(), &initial);
    }

    #[test]
    fn toggle_is_not_limited_to_catalog_members() {
        // Membership being a subset of the catalog is not enforced.
        let mut selection = TopicSelection::new(sample_catalog(), BTreeSet::new());

        selection.toggle(&tid("cooking"));

        assert!(selection.is_selected(&tid("cooking")));
    }

    proptest! {
        /// After any toggle sequence, membership equals the symmetric
        /// difference of the initial set and the oddly-toggled ids.
        #[test]
        fn toggles_equal_symmetric_difference(
            initial in proptest::collection::btree_set(0u8..8, 0..8),
            toggles in proptest::collection::vec(0u8..8, 0..32),
        ) {
            let to_id = |n: u8| TopicId::new(format!("topic-{}", n)).unwrap();
            let initial: BTreeSet<TopicId> = initial.into_iter().map(to_id).collect();

            let mut selection = TopicSelection::new(Vec::new(), initial.clone());
            for n in &toggles {
                selection.toggle(&to_id(*n));
            }

            let odd: BTreeSet<TopicId> = (0u8..8)
                .filter(|n| toggles.iter().filter(|t| *t == n).count() % 2 == 1)
                .map(to_id)
                .collect();
            let expected: BTreeSet<TopicId> =
                initial.symmetric_difference(&odd).cloned().collect();

            prop_assert_eq!(selection.selected(), &expected);
        }
    }
}
