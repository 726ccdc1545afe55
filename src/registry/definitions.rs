use std::collections::HashMap;

use anyhow::{Context as _, Result};
use tracing::info;

use super::rules::COMPREHENSIVE_RULES_URL;
use crate::utils::matching;

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub term: String,
    pub text: String,
}

/// Glossary of game terms, parsed out of the tail of the comprehensive rules
/// document. Loaded independently of the rules registry.
pub struct Definitions {
    entries: Vec<Definition>,
    by_term: HashMap<String, usize>,
}

impl Definitions {
    pub fn new() -> Self {
        Definitions {
            entries: Vec::new(),
            by_term: HashMap::new(),
        }
    }

    pub async fn load(&mut self, http: &reqwest::Client) -> Result<()> {
        let body = http
            .get(COMPREHENSIVE_RULES_URL)
            .send()
            .await
            .context("glossary request failed")?
            .error_for_status()?
            .text()
            .await?;

        let entries = Self::parse(&body);
        if entries.is_empty() {
            anyhow::bail!("no glossary entries found in comprehensive rules document");
        }
        info!("Loaded {} glossary definitions", entries.len());
        self.install(entries);
        Ok(())
    }

    /// The glossary sits between the last `Glossary` heading and the final
    /// `Credits` heading. Entries are blank-line separated blocks: a term
    /// line followed by its definition.
    pub fn parse(text: &str) -> Vec<Definition> {
        let Some(start) = text.rfind("\nGlossary") else {
            return Vec::new();
        };
        let tail = &text[start + "\nGlossary".len()..];
        let tail = match tail.rfind("\nCredits") {
            Some(end) => &tail[..end],
            None => tail,
        };

        let mut entries = Vec::new();
        for block in tail.split("\n\n") {
            let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
            let Some(term) = lines.next() else {
                continue;
            };
            let definition = lines.collect::<Vec<_>>().join(" ");
            if definition.is_empty() {
                continue;
            }

            entries.push(Definition {
                term: term.to_string(),
                text: definition,
            });
        }

        entries
    }

    pub fn install(&mut self, entries: Vec<Definition>) {
        let by_term = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (matching::normalize(&entry.term), index))
            .collect();

        self.entries = entries;
        self.by_term = by_term;
    }

    /// Exact term match first, then prefix, then substring.
    pub fn find(&self, term: &str) -> Option<&Definition> {
        let needle = matching::normalize(term);
        if needle.is_empty() {
            return None;
        }

        if let Some(&index) = self.by_term.get(&needle) {
            return Some(&self.entries[index]);
        }

        self.scan(|candidate| candidate.starts_with(&needle))
            .or_else(|| self.scan(|candidate| candidate.contains(&needle)))
    }

    fn scan(&self, accept: impl Fn(&str) -> bool) -> Option<&Definition> {
        self.by_term
            .iter()
            .filter(|(term, _)| accept(term.as_str()))
            .min_by_key(|(term, _)| term.len())
            .map(|(_, &index)| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
