use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::info;

use crate::utils::matching;

/// MTGJSON-style dump of every set together with its cards.
pub const CARD_DATA_URL: &str = "https://mtgjson.com/json/AllSets.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default, rename = "manaCost")]
    pub mana_cost: Option<String>,
    #[serde(default, rename = "type")]
    pub type_line: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default, rename = "multiverseid")]
    pub multiverse_id: Option<u64>,
    /// Code of the set this printing belongs to; stamped while indexing.
    #[serde(skip)]
    pub set_code: String,
}

/// Set header without its card list.
#[derive(Debug, Clone)]
pub struct SetInfo {
    pub code: String,
    pub name: String,
    pub release_date: Option<String>,
    pub set_type: Option<String>,
    pub block: Option<String>,
    pub card_count: usize,
}

#[derive(Debug, Deserialize)]
struct RawSet {
    code: String,
    name: String,
    #[serde(default, rename = "releaseDate")]
    release_date: Option<String>,
    #[serde(default, rename = "type")]
    set_type: Option<String>,
    #[serde(default)]
    block: Option<String>,
    #[serde(default)]
    cards: Vec<Card>,
}

/// One loaded snapshot of the card database. `Cards` and `Sets` are views
/// into the same snapshot, so the two can never disagree about a printing.
#[derive(Debug, Default)]
pub struct CardDataset {
    cards: Vec<Card>,
    sets: Vec<SetInfo>,
    by_name: HashMap<String, Vec<usize>>,
    sets_by_code: HashMap<String, usize>,
}

impl CardDataset {
    pub fn parse(text: &str) -> Result<Self> {
        let raw: HashMap<String, RawSet> =
            serde_json::from_str(text).context("malformed card data document")?;

        let mut raw_sets: Vec<RawSet> = raw.into_values().collect();
        // Oldest set first, so the last indexed printing of a name is the
        // most recent one.
        raw_sets.sort_by(|a, b| a.release_date.cmp(&b.release_date));

        let mut dataset = CardDataset::default();
        for mut raw_set in raw_sets {
            let cards = std::mem::take(&mut raw_set.cards);
            let set_index = dataset.sets.len();
            dataset
                .sets_by_code
                .insert(raw_set.code.to_uppercase(), set_index);

            let card_count = cards.len();
            for mut card in cards {
                card.set_code = raw_set.code.clone();
                let index = dataset.cards.len();
                dataset
                    .by_name
                    .entry(matching::normalize(&card.name))
                    .or_default()
                    .push(index);
                dataset.cards.push(card);
            }

            dataset.sets.push(SetInfo {
                code: raw_set.code,
                name: raw_set.name,
                release_date: raw_set.release_date,
                set_type: raw_set.set_type,
                block: raw_set.block,
                card_count,
            });
        }

        Ok(dataset)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Look a card up by name: exact normalized match first, then prefix,
    /// then substring, then typo tolerance. Exact matches resolve to the most
    /// recent printing.
    pub fn find_card(&self, query: &str) -> Option<&Card> {
        let needle = matching::normalize(query);
        if needle.is_empty() {
            return None;
        }

        if let Some(indices) = self.by_name.get(&needle) {
            return indices.last().map(|&i| &self.cards[i]);
        }

        if let Some(card) = self.scan(|name| name.starts_with(&needle)) {
            return Some(card);
        }
        if let Some(card) = self.scan(|name| name.contains(&needle)) {
            return Some(card);
        }

        let keys: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        let index = matching::closest(&needle, keys.iter().copied())?;
        self.by_name
            .get(keys[index])
            .and_then(|indices| indices.last())
            .map(|&i| &self.cards[i])
    }

    fn scan(&self, accept: impl Fn(&str) -> bool) -> Option<&Card> {
        self.by_name
            .iter()
            .filter(|(name, _)| accept(name.as_str()))
            .min_by_key(|(name, _)| name.len())
            .and_then(|(_, indices)| indices.last())
            .map(|&i| &self.cards[i])
    }

    /// Every printing of an exact card name, oldest first.
    pub fn printings(&self, name: &str) -> Vec<&Card> {
        self.by_name
            .get(&matching::normalize(name))
            .map(|indices| indices.iter().map(|&i| &self.cards[i]).collect())
            .unwrap_or_default()
    }

    pub fn set_by_code(&self, code: &str) -> Option<&SetInfo> {
        self.sets_by_code
            .get(&code.to_uppercase())
            .map(|&i| &self.sets[i])
    }

    pub fn find_set(&self, query: &str) -> Option<&SetInfo> {
        if let Some(set) = self.set_by_code(query.trim()) {
            return Some(set);
        }

        let needle = matching::normalize(query);
        if needle.is_empty() {
            return None;
        }
        self.sets
            .iter()
            .find(|set| matching::normalize(&set.name) == needle)
            .or_else(|| {
                self.sets
                    .iter()
                    .find(|set| matching::normalize(&set.name).contains(&needle))
            })
    }
}

/// Shared owner of the loaded card data. Construct it once, hand clones of
/// the `Arc` to the `Cards` and `Sets` registries, then call `load`.
pub struct CardSource {
    url: String,
    state: RwLock<Arc<CardDataset>>,
}

impl CardSource {
    pub fn new(url: impl Into<String>) -> Self {
        CardSource {
            url: url.into(),
            state: RwLock::new(Arc::new(CardDataset::default())),
        }
    }

    /// Fetch and install a fresh snapshot. Until this succeeds, views answer
    /// from the empty snapshot.
    pub async fn load(&self, http: &reqwest::Client) -> Result<()> {
        let body = http
            .get(&self.url)
            .send()
            .await
            .context("card data request failed")?
            .error_for_status()?
            .text()
            .await?;

        let dataset = CardDataset::parse(&body)?;
        info!(
            "Loaded {} cards across {} sets",
            dataset.card_count(),
            dataset.set_count()
        );
        self.install(dataset);
        Ok(())
    }

    pub fn install(&self, dataset: CardDataset) {
        *self.state.write().unwrap() = Arc::new(dataset);
    }

    pub fn snapshot(&self) -> Arc<CardDataset> {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const FIXTURE: &str = r#"{
        "LEA": {
            "code": "LEA",
            "name": "Limited Edition Alpha",
            "releaseDate": "1993-08-05",
            "type": "core",
            "cards": [
                {
                    "name": "Lightning Bolt",
                    "manaCost": "{R}",
                    "type": "Instant",
                    "text": "Lightning Bolt deals 3 damage to any target.",
                    "rarity": "Common",
                    "number": "161",
                    "multiverseid": 209
                },
                {
                    "name": "Giant Growth",
                    "manaCost": "{G}",
                    "type": "Instant",
                    "text": "Target creature gets +3/+3 until end of turn.",
                    "rarity": "Common",
                    "number": "182"
                }
            ]
        },
        "M11": {
            "code": "M11",
            "name": "Magic 2011",
            "releaseDate": "2010-07-16",
            "type": "core",
            "cards": [
                {
                    "name": "Lightning Bolt",
                    "manaCost": "{R}",
                    "type": "Instant",
                    "text": "Lightning Bolt deals 3 damage to any target.",
                    "rarity": "Common",
                    "number": "149",
                    "multiverseid": 205399
                },
                {
                    "name": "Ajani Goldmane",
                    "manaCost": "{2}{W}{W}",
                    "type": "Planeswalker — Ajani",
                    "loyalty": "4",
                    "rarity": "Mythic Rare",
                    "number": "1"
                }
            ]
        }
    }"#;

    pub(crate) fn fixture_dataset() -> CardDataset {
        CardDataset::parse(FIXTURE).expect("fixture parses")
    }

    #[test]
    fn parses_cards_and_sets() {
        let dataset = fixture_dataset();
        assert_eq!(dataset.card_count(), 4);
        assert_eq!(dataset.set_count(), 2);
    }

    #[test]
    fn exact_lookup_prefers_most_recent_printing() {
        let dataset = fixture_dataset();
        let bolt = dataset.find_card("lightning bolt").expect("bolt");
        assert_eq!(bolt.set_code, "M11");

        let printings = dataset.printings("Lightning Bolt");
        assert_eq!(printings.len(), 2);
        assert_eq!(printings[0].set_code, "LEA");
    }

    #[test]
    fn lookup_tolerates_punctuation_prefix_and_typos() {
        let dataset = fixture_dataset();
        assert!(dataset.find_card("LIGHTNING BOLT!").is_some());
        assert_eq!(dataset.find_card("ajani").unwrap().name, "Ajani Goldmane");
        assert_eq!(
            dataset.find_card("gaint growth").unwrap().name,
            "Giant Growth"
        );
        assert!(dataset.find_card("storm crow").is_none());
        assert!(dataset.find_card("").is_none());
    }

    #[test]
    fn every_card_resolves_to_a_known_set() {
        let dataset = fixture_dataset();
        for card in dataset.cards.iter() {
            let set = dataset
                .set_by_code(&card.set_code)
                .unwrap_or_else(|| panic!("set {} missing", card.set_code));
            assert!(set.card_count > 0);
        }
    }

    #[test]
    fn sets_resolve_by_code_and_name() {
        let dataset = fixture_dataset();
        assert_eq!(dataset.set_by_code("lea").unwrap().name, "Limited Edition Alpha");
        assert_eq!(dataset.find_set("Magic 2011").unwrap().code, "M11");
        assert_eq!(dataset.find_set("alpha").unwrap().code, "LEA");
    }

    #[test]
    fn empty_snapshot_answers_empty() {
        let source = CardSource::new(CARD_DATA_URL);
        let snapshot = source.snapshot();
        assert_eq!(snapshot.card_count(), 0);
        assert!(snapshot.find_card("Lightning Bolt").is_none());
        assert!(snapshot.find_set("LEA").is_none());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(CardDataset::parse("not json").is_err());
    }

    #[test]
    fn install_replaces_the_snapshot_for_new_readers() {
        let source = CardSource::new(CARD_DATA_URL);
        let before = source.snapshot();
        source.install(fixture_dataset());

        assert_eq!(before.card_count(), 0);
        assert_eq!(source.snapshot().card_count(), 4);
    }
}
