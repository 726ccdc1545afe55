use std::time::Duration;

use anyhow::{Context as _, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::info;

pub const PRICING_API_URL: &str = "https://api.scryfall.com/cards/named";

#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub label: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardPricing {
    pub card_name: String,
    pub entries: Vec<PriceEntry>,
    pub store_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceDocument {
    name: String,
    #[serde(default)]
    prices: PriceMap,
    #[serde(default)]
    scryfall_uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PriceMap {
    usd: Option<String>,
    usd_foil: Option<String>,
    eur: Option<String>,
    tix: Option<String>,
}

/// On-demand price lookups against an external pricing API. `init` wires up
/// the HTTP client; there is no bulk data load.
pub struct PricingManager {
    http: Option<reqwest::Client>,
}

impl PricingManager {
    pub fn new() -> Self {
        PricingManager { http: None }
    }

    pub fn init(&mut self) -> Result<()> {
        let http = reqwest::Client::builder()
            .user_agent("discord-grimoire")
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build pricing HTTP client")?;

        self.http = Some(http);
        info!("Pricing manager initialized");
        Ok(())
    }

    /// Current prices for a card name, or `None` when the API does not know
    /// the card.
    pub async fn lookup(&self, card_name: &str) -> Result<Option<CardPricing>> {
        let http = self
            .http
            .as_ref()
            .context("pricing manager was not initialized")?;

        let response = http
            .get(PRICING_API_URL)
            .query(&[("fuzzy", card_name)])
            .send()
            .await
            .context("price request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.error_for_status()?.text().await?;
        Ok(Some(Self::parse_response(&body)?))
    }

    pub fn parse_response(text: &str) -> Result<CardPricing> {
        let document: PriceDocument =
            serde_json::from_str(text).context("malformed price document")?;

        let mut entries = Vec::new();
        let mut push = |label: &str, prefix: &str, value: Option<String>| {
            if let Some(amount) = value {
                entries.push(PriceEntry {
                    label: label.to_string(),
                    amount: format!("{prefix}{amount}"),
                });
            }
        };

        push("USD", "$", document.prices.usd);
        push("USD (foil)", "$", document.prices.usd_foil);
        push("EUR", "€", document.prices.eur);
        push("MTGO", "", document.prices.tix.map(|t| format!("{t} tix")));

        Ok(CardPricing {
            card_name: document.name,
            entries,
            store_url: document.scryfall_uri,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "name": "Lightning Bolt",
        "prices": {
            "usd": "1.52",
            "usd_foil": null,
            "eur": "1.05",
            "tix": "0.03"
        },
        "scryfall_uri": "https://scryfall.com/card/clu/141/lightning-bolt"
    }"#;

    #[test]
    fn parses_known_currencies() {
        let pricing = PricingManager::parse_response(FIXTURE).expect("parses");

        assert_eq!(pricing.card_name, "Lightning Bolt");
        assert_eq!(pricing.entries.len(), 3);
        assert_eq!(pricing.entries[0].label, "USD");
        assert_eq!(pricing.entries[0].amount, "$1.52");
        assert_eq!(pricing.entries[2].amount, "0.03 tix");
        assert!(pricing.store_url.is_some());
    }

    #[test]
    fn missing_price_block_parses_empty() {
        let pricing = PricingManager::parse_response(r#"{"name": "Storm Crow"}"#).unwrap();
        assert!(pricing.entries.is_empty());
        assert!(pricing.store_url.is_none());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(PricingManager::parse_response("[]").is_err());
    }

    #[tokio::test]
    async fn lookup_requires_init() {
        let manager = PricingManager::new();
        let err = manager
            .lookup("Lightning Bolt")
            .await
            .expect_err("uninitialized manager must refuse lookups");
        assert!(err.to_string().contains("not initialized"));

        let mut manager = PricingManager::new();
        manager.init().expect("init");
    }
}
