use std::sync::Arc;

use super::source::{Card, CardSource};

/// Card lookup view over the shared [`CardSource`] snapshot.
pub struct Cards {
    source: Arc<CardSource>,
}

impl Cards {
    pub fn new(source: Arc<CardSource>) -> Self {
        Cards { source }
    }

    pub fn find(&self, query: &str) -> Option<Card> {
        self.source.snapshot().find_card(query).cloned()
    }

    /// Every printing of an exact name, oldest first.
    pub fn printings(&self, name: &str) -> Vec<Card> {
        self.source
            .snapshot()
            .printings(name)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.source.snapshot().card_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
