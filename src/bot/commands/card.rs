use crate::bot::{Context, Error};
use crate::utils::format::{create_card_embed, create_error_embed, create_info_embed};

/// Look up a card by name
#[poise::command(slash_command)]
pub async fn card(
    ctx: Context<'_>,
    #[description = "Card name to look up"] name: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    match registries.cards.find(&name) {
        Some(card) => {
            let set_name = registries.sets.by_code(&card.set_code).map(|set| set.name);
            let image = registries.image_providers.url_for(&card);
            let mut embed = create_card_embed(&card, set_name.as_deref(), image);

            let printings = registries.cards.printings(&card.name);
            if printings.len() > 1 {
                let codes: Vec<&str> = printings
                    .iter()
                    .map(|printing| printing.set_code.as_str())
                    .collect();
                embed = embed.field("Printings", codes.join(", "), true);
            }

            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            let embed = create_error_embed(
                "Card not found",
                &format!("No card found matching \"{name}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Look up current prices for a card
#[poise::command(slash_command)]
pub async fn price(
    ctx: Context<'_>,
    #[description = "Card name to price"] name: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    // Resolve through the card registry first so typos still price the
    // card the user meant.
    let resolved = registries
        .cards
        .find(&name)
        .map(|card| card.name)
        .unwrap_or(name);

    match registries.pricing.lookup(&resolved).await {
        Ok(Some(pricing)) => {
            let mut description = String::new();
            for entry in &pricing.entries {
                description.push_str(&format!("**{}**: {}\n", entry.label, entry.amount));
            }
            if pricing.entries.is_empty() {
                description.push_str("No prices are currently listed for this card.");
            }
            if let Some(url) = &pricing.store_url {
                description.push_str(&format!("\n[Store page]({url})"));
            }

            let embed =
                create_info_embed(&format!("Prices for {}", pricing.card_name), &description);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(None) => {
            let embed = create_error_embed(
                "No prices found",
                &format!("The pricing service does not know \"{resolved}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(e) => {
            let embed =
                create_error_embed("Price lookup failed", &format!("Could not fetch prices: {e}"));
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Look up a set by code or name
#[poise::command(slash_command)]
pub async fn set(
    ctx: Context<'_>,
    #[description = "Set code or name"] query: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    match registries.sets.find(&query) {
        Some(set) => {
            let mut description = format!("Code: `{}`", set.code);
            if let Some(release) = &set.release_date {
                description.push_str(&format!("\nReleased: {release}"));
            }
            if let Some(set_type) = &set.set_type {
                description.push_str(&format!("\nType: {set_type}"));
            }
            if let Some(block) = &set.block {
                description.push_str(&format!("\nBlock: {block}"));
            }
            description.push_str(&format!("\nCards: {}", set.card_count));

            let embed = create_info_embed(&set.name, &description);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            let embed = create_error_embed(
                "Set not found",
                &format!("No set found matching \"{query}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Look up a token card
#[poise::command(slash_command)]
pub async fn token(
    ctx: Context<'_>,
    #[description = "Token name to look up"] name: String,
    #[description = "Set code to narrow the search"] set: Option<String>,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    let matches = registries.tokens.find(&name, set.as_deref());
    if matches.is_empty() {
        let embed = create_error_embed(
            "Token not found",
            &format!("No token found matching \"{name}\"."),
        );
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    }

    let mut description = String::new();
    for token in &matches {
        if let Some(type_line) = &token.type_line {
            description.push_str(&format!("**{type_line}**"));
        }
        if let (Some(power), Some(toughness)) = (&token.power, &token.toughness) {
            description.push_str(&format!(" {power}/{toughness}"));
        }
        if let Some(set) = &token.set {
            description.push_str(&format!(" ({set})"));
        }
        if let Some(text) = &token.text {
            description.push_str(&format!("\n{text}"));
        }
        description.push('\n');
    }

    let embed = create_info_embed(&matches[0].name, &description);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
