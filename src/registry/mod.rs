pub mod cards;
pub mod definitions;
pub mod image_providers;
pub mod infraction_guide;
pub mod pricing;
pub mod rules;
pub mod sections;
pub mod sets;
pub mod source;
pub mod tokens;
pub mod tournament_rules;

use std::sync::Arc;

use tracing::{error, info};

use cards::Cards;
use definitions::Definitions;
use image_providers::ImageProviders;
use infraction_guide::InfractionGuide;
use pricing::PricingManager;
use rules::ComprehensiveRules;
use sets::Sets;
use source::CardSource;
use tokens::Tokens;
use tournament_rules::TournamentRules;

/// Every reference registry the bot serves from, built once at startup and
/// read-only afterwards.
pub struct Registries {
    pub image_providers: ImageProviders,
    pub cards: Cards,
    pub sets: Sets,
    pub tokens: Tokens,
    pub definitions: Definitions,
    pub comprehensive_rules: ComprehensiveRules,
    pub tournament_rules: TournamentRules,
    pub infraction_guide: InfractionGuide,
    pub pricing: PricingManager,
}

/// Construct and load every registry, in a fixed order. A failed load is
/// logged and leaves that registry empty; it never aborts startup and never
/// blocks the remaining loads.
pub async fn load_all(http: &reqwest::Client) -> Registries {
    let image_providers = ImageProviders::new();
    info!("Image providers ready: {:?}", image_providers.names());

    // Cards and sets are views over one shared dataset. Both views exist
    // before the load runs, and both observe the same snapshot afterwards.
    let card_source = Arc::new(CardSource::new(source::CARD_DATA_URL));
    let cards = Cards::new(Arc::clone(&card_source));
    let sets = Sets::new(Arc::clone(&card_source));
    if let Err(err) = card_source.load(http).await {
        error!("Failed to load card data: {err:#}");
    }

    let mut tokens = Tokens::new();
    if let Err(err) = tokens.load(http).await {
        error!("Failed to load tokens: {err:#}");
    }

    let mut definitions = Definitions::new();
    if let Err(err) = definitions.load(http).await {
        error!("Failed to load glossary definitions: {err:#}");
    }

    let mut comprehensive_rules = ComprehensiveRules::new();
    if let Err(err) = comprehensive_rules.load(http).await {
        error!("Failed to load comprehensive rules: {err:#}");
    }

    let mut tournament_rules = TournamentRules::new();
    if let Err(err) = tournament_rules.load(http).await {
        error!("Failed to load tournament rules: {err:#}");
    }

    let mut infraction_guide = InfractionGuide::new();
    if let Err(err) = infraction_guide.load(http).await {
        error!("Failed to load infraction procedure guide: {err:#}");
    }

    let mut pricing = PricingManager::new();
    if let Err(err) = pricing.init() {
        error!("Failed to initialize pricing manager: {err:#}");
    }

    info!(
        "Reference data ready: {} cards, {} sets, {} tokens, {} definitions, {} rule paragraphs, {} MTR sections, {} IPG sections",
        cards.len(),
        sets.len(),
        tokens.len(),
        definitions.len(),
        comprehensive_rules.len(),
        tournament_rules.len(),
        infraction_guide.len()
    );

    Registries {
        image_providers,
        cards,
        sets,
        tokens,
        definitions,
        comprehensive_rules,
        tournament_rules,
        infraction_guide,
        pricing,
    }
}
