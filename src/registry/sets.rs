use std::sync::Arc;

use super::source::{CardSource, SetInfo};

/// Set lookup view over the shared [`CardSource`] snapshot.
pub struct Sets {
    source: Arc<CardSource>,
}

impl Sets {
    pub fn new(source: Arc<CardSource>) -> Self {
        Sets { source }
    }

    pub fn by_code(&self, code: &str) -> Option<SetInfo> {
        self.source.snapshot().set_by_code(code).cloned()
    }

    /// Lookup by set code first, then by (partial) set name.
    pub fn find(&self, query: &str) -> Option<SetInfo> {
        self.source.snapshot().find_set(query).cloned()
    }

    pub fn len(&self) -> usize {
        self.source.snapshot().set_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::cards::Cards;
    use crate::registry::source::tests::fixture_dataset;
    use crate::registry::source::CARD_DATA_URL;

    #[test]
    fn cards_and_sets_share_one_snapshot() {
        let source = Arc::new(CardSource::new(CARD_DATA_URL));
        let cards = Cards::new(Arc::clone(&source));
        let sets = Sets::new(Arc::clone(&source));

        source.install(fixture_dataset());

        // A card's set reference resolves in the set view of the same load.
        let bolt = cards.find("Lightning Bolt").expect("bolt");
        let home = sets.by_code(&bolt.set_code).expect("set");
        assert_eq!(home.name, "Magic 2011");
    }

    #[test]
    fn unloaded_view_answers_empty() {
        let source = Arc::new(CardSource::new(CARD_DATA_URL));
        let sets = Sets::new(source);

        assert!(sets.is_empty());
        assert!(sets.find("Alpha").is_none());
        assert!(sets.by_code("LEA").is_none());
    }
}
