use super::source::Card;

/// A service able to serve card images by some identifying attribute.
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Image URL for the printing, when this provider can serve it.
    fn url_for(&self, card: &Card) -> Option<String>;
}

/// Gatherer serves scans for printings that carry a multiverse id.
struct Gatherer;

impl ImageProvider for Gatherer {
    fn name(&self) -> &'static str {
        "Gatherer"
    }

    fn url_for(&self, card: &Card) -> Option<String> {
        let id = card.multiverse_id?;
        Some(format!(
            "https://gatherer.wizards.com/Handlers/Image.ashx?multiverseid={id}&type=card"
        ))
    }
}

/// Scryfall addresses printings by set code and collector number.
struct Scryfall;

impl ImageProvider for Scryfall {
    fn name(&self) -> &'static str {
        "Scryfall"
    }

    fn url_for(&self, card: &Card) -> Option<String> {
        let number = card.number.as_ref()?;
        Some(format!(
            "https://api.scryfall.com/cards/{}/{}?format=image",
            card.set_code.to_lowercase(),
            number
        ))
    }
}

/// Ordered registry of image providers; ready as soon as it is constructed.
pub struct ImageProviders {
    providers: Vec<Box<dyn ImageProvider>>,
}

impl ImageProviders {
    pub fn new() -> Self {
        ImageProviders {
            providers: vec![Box::new(Gatherer), Box::new(Scryfall)],
        }
    }

    /// First provider able to serve the printing wins.
    pub fn url_for(&self, card: &Card) -> Option<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.url_for(card))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(multiverse_id: Option<u64>, number: Option<&str>) -> Card {
        Card {
            name: "Lightning Bolt".to_string(),
            mana_cost: Some("{R}".to_string()),
            type_line: Some("Instant".to_string()),
            text: None,
            power: None,
            toughness: None,
            loyalty: None,
            rarity: Some("Common".to_string()),
            number: number.map(str::to_string),
            multiverse_id,
            set_code: "M11".to_string(),
        }
    }

    #[test]
    fn gatherer_wins_when_a_multiverse_id_exists() {
        let providers = ImageProviders::new();
        let url = providers.url_for(&card(Some(205399), Some("149"))).unwrap();
        assert!(url.contains("gatherer.wizards.com"));
        assert!(url.contains("205399"));
    }

    #[test]
    fn falls_through_to_scryfall() {
        let providers = ImageProviders::new();
        let url = providers.url_for(&card(None, Some("149"))).unwrap();
        assert!(url.contains("scryfall.com/cards/m11/149"));
    }

    #[test]
    fn unidentifiable_printings_have_no_image() {
        let providers = ImageProviders::new();
        assert!(providers.url_for(&card(None, None)).is_none());
    }

    #[test]
    fn providers_are_registered_in_priority_order() {
        assert_eq!(ImageProviders::new().names(), vec!["Gatherer", "Scryfall"]);
    }
}
