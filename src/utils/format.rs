use crate::registry::source::Card;
use poise::serenity_prelude as serenity;

/// Discord caps embed descriptions at 4096 characters; stay comfortably under.
const DESCRIPTION_LIMIT: usize = 2048;

pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn create_error_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(truncate(description, DESCRIPTION_LIMIT))
        .color(0xff0000) // Red
        .timestamp(chrono::Utc::now())
}

pub fn create_info_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(truncate(description, DESCRIPTION_LIMIT))
        .color(0x3498db) // Blue
        .timestamp(chrono::Utc::now())
}

pub fn create_card_embed(
    card: &Card,
    set_name: Option<&str>,
    image_url: Option<String>,
) -> serenity::CreateEmbed {
    let mut description = String::new();

    if let Some(mana_cost) = &card.mana_cost {
        description.push_str(&format!("`{}`\n", mana_cost));
    }
    if let Some(type_line) = &card.type_line {
        description.push_str(&format!("**{}**\n", type_line));
    }
    if let Some(text) = &card.text {
        description.push('\n');
        description.push_str(text);
    }

    let mut embed = serenity::CreateEmbed::new()
        .title(&card.name)
        .description(truncate(&description, DESCRIPTION_LIMIT))
        .color(rarity_color(card.rarity.as_deref()))
        .timestamp(chrono::Utc::now());

    if let (Some(power), Some(toughness)) = (&card.power, &card.toughness) {
        embed = embed.field("P/T", format!("{}/{}", power, toughness), true);
    }
    if let Some(loyalty) = &card.loyalty {
        embed = embed.field("Loyalty", loyalty.clone(), true);
    }

    let footer = match (set_name, card.rarity.as_deref()) {
        (Some(set), Some(rarity)) => format!("{} ({}) · {}", set, card.set_code, rarity),
        (Some(set), None) => format!("{} ({})", set, card.set_code),
        (None, _) => card.set_code.clone(),
    };
    embed = embed.footer(serenity::CreateEmbedFooter::new(footer));

    if let Some(url) = image_url {
        embed = embed.image(url);
    }

    embed
}

fn rarity_color(rarity: Option<&str>) -> u32 {
    match rarity.map(str::to_lowercase).as_deref() {
        Some("mythic") | Some("mythic rare") => 0xff4500, // Orange
        Some("rare") => 0xffd700,                         // Gold
        Some("uncommon") => 0xc0c0c0,                     // Silver
        _ => 0x95a5a6,                                    // Gray
    }
}
