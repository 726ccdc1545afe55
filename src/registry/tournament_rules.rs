use anyhow::{Context as _, Result};
use tracing::info;

use super::sections::{self, Section, SectionIndex};

pub const TOURNAMENT_RULES_URL: &str =
    "https://media.wizards.com/downloads/MagicTournamentRules.txt";

/// Magic Tournament Rules, addressable by section number or title.
pub struct TournamentRules {
    index: SectionIndex,
}

impl TournamentRules {
    pub fn new() -> Self {
        TournamentRules {
            index: SectionIndex::empty(),
        }
    }

    pub async fn load(&mut self, http: &reqwest::Client) -> Result<()> {
        let body = http
            .get(TOURNAMENT_RULES_URL)
            .send()
            .await
            .context("tournament rules request failed")?
            .error_for_status()?
            .text()
            .await?;

        let parsed = sections::parse_sections(&body);
        if parsed.is_empty() {
            anyhow::bail!("no sections found in tournament rules document");
        }
        info!("Loaded {} tournament rule sections", parsed.len());
        self.install(parsed);
        Ok(())
    }

    pub fn install(&mut self, sections: Vec<Section>) {
        self.index = SectionIndex::new(sections);
    }

    pub fn find(&self, query: &str) -> Option<&Section> {
        self.index.search(query)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
