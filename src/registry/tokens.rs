use std::collections::HashMap;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::info;

use crate::utils::matching;

pub const TOKENS_URL: &str = "https://mtgjson.com/json/AllTokens.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_line: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub set: Option<String>,
}

/// Token card registry. Multiple sets can print a token under the same name,
/// so name lookups return every variant.
pub struct Tokens {
    entries: Vec<Token>,
    by_name: HashMap<String, Vec<usize>>,
}

impl Tokens {
    pub fn new() -> Self {
        Tokens {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub async fn load(&mut self, http: &reqwest::Client) -> Result<()> {
        let body = http
            .get(TOKENS_URL)
            .send()
            .await
            .context("token data request failed")?
            .error_for_status()?
            .text()
            .await?;

        let entries = Self::parse(&body)?;
        info!("Loaded {} tokens", entries.len());
        self.install(entries);
        Ok(())
    }

    pub fn parse(text: &str) -> Result<Vec<Token>> {
        serde_json::from_str(text).context("malformed token document")
    }

    pub fn install(&mut self, entries: Vec<Token>) {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, token) in entries.iter().enumerate() {
            by_name
                .entry(matching::normalize(&token.name))
                .or_default()
                .push(index);
        }

        self.entries = entries;
        self.by_name = by_name;
    }

    /// Every token variant matching the name, optionally narrowed to a set.
    pub fn find(&self, name: &str, set: Option<&str>) -> Vec<&Token> {
        let matches = match self.by_name.get(&matching::normalize(name)) {
            Some(indices) => indices.iter().map(|&i| &self.entries[i]).collect(),
            None => Vec::new(),
        };

        match set {
            Some(code) => matches
                .into_iter()
                .filter(|token| {
                    token
                        .set
                        .as_ref()
                        .is_some_and(|s| s.eq_ignore_ascii_case(code))
                })
                .collect(),
            None => matches,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
