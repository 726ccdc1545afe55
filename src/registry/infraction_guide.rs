use anyhow::{Context as _, Result};
use tracing::info;

use super::sections::{self, Section, SectionIndex};

pub const INFRACTION_GUIDE_URL: &str =
    "https://media.wizards.com/downloads/MagicInfractionProcedureGuide.txt";

/// Infraction Procedure Guide, addressable by section number or infraction
/// name. Infraction sections carry a penalty line in their body.
pub struct InfractionGuide {
    index: SectionIndex,
}

impl InfractionGuide {
    pub fn new() -> Self {
        InfractionGuide {
            index: SectionIndex::empty(),
        }
    }

    pub async fn load(&mut self, http: &reqwest::Client) -> Result<()> {
        let body = http
            .get(INFRACTION_GUIDE_URL)
            .send()
            .await
            .context("infraction guide request failed")?
            .error_for_status()?
            .text()
            .await?;

        let parsed = sections::parse_sections(&body);
        if parsed.is_empty() {
            anyhow::bail!("no sections found in infraction guide document");
        }
        info!("Loaded {} infraction guide sections", parsed.len());
        self.install(parsed);
        Ok(())
    }

    pub fn install(&mut self, sections: Vec<Section>) {
        self.index = SectionIndex::new(sections);
    }

    pub fn find(&self, query: &str) -> Option<&Section> {
        self.index.search(query)
    }

    /// The penalty named on the line following a `Penalty` marker, when the
    /// section defines one.
    pub fn penalty_of(section: &Section) -> Option<&str> {
        let mut lines = section.body.lines().map(str::trim);
        while let Some(line) = lines.next() {
            if line.eq_ignore_ascii_case("penalty") {
                return lines.find(|candidate| !candidate.is_empty());
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
1. General Philosophy

Judges are neutral arbiters and enforcers of policy and rules.

2.1 Game Play Error — Missed Trigger

Definition

A triggered ability triggers, but the player controlling it does not acknowledge it.

Penalty

Warning

2.5 Game Play Error — Game Rule Violation

Definition

A player breaks a rule defined by the game rules.

Penalty

Warning
";

    fn loaded() -> InfractionGuide {
        let mut guide = InfractionGuide::new();
        guide.install(sections::parse_sections(FIXTURE));
        guide
    }

    #[test]
    fn finds_infractions_by_number_and_name() {
        let guide = loaded();

        assert_eq!(guide.len(), 3);
        let missed = guide.find("2.1").expect("missed trigger");
        assert!(missed.title.contains("Missed Trigger"));
        assert_eq!(guide.find("game rule violation").unwrap().number, "2.5");
    }

    #[test]
    fn extracts_the_penalty_line() {
        let guide = loaded();

        let missed = guide.find("2.1").unwrap();
        assert_eq!(InfractionGuide::penalty_of(missed), Some("Warning"));

        let philosophy = guide.find("1").unwrap();
        assert_eq!(InfractionGuide::penalty_of(philosophy), None);
    }

    #[test]
    fn empty_registry_answers_empty() {
        let guide = InfractionGuide::new();
        assert!(guide.is_empty());
        assert!(guide.find("2.1").is_none());
    }
}
