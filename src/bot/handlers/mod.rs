use crate::bot::{Data, Error};
use crate::utils::format::create_card_embed;
use poise::serenity_prelude as serenity;

/// Most inline references a single message will resolve; the rest are ignored.
const MAX_INLINE_REFERENCES: usize = 3;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!("Bot logged in as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::Message { new_message } => {
            if new_message.author.bot {
                return Ok(());
            }
            if let Err(e) = handle_inline_references(ctx, new_message, data).await {
                tracing::error!("Error handling inline card references: {:?}", e);
            }
        }
        _ => {}
    }
    Ok(())
}

async fn handle_inline_references(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    let registries = &data.registries;

    for name in extract_inline_references(&message.content) {
        match registries.cards.find(&name) {
            Some(card) => {
                let set_name = registries.sets.by_code(&card.set_code).map(|set| set.name);
                let image = registries.image_providers.url_for(&card);
                let embed = create_card_embed(&card, set_name.as_deref(), image);
                message
                    .channel_id
                    .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
                    .await?;
            }
            None => {
                message
                    .channel_id
                    .send_message(
                        &ctx.http,
                        serenity::CreateMessage::new()
                            .content(format!("No card found matching \"{name}\".")),
                    )
                    .await?;
            }
        }
    }

    Ok(())
}

/// Card names referenced inline as `<<Name>>` or `[[Name]]`, deduplicated
/// case-insensitively and capped at [`MAX_INLINE_REFERENCES`].
pub fn extract_inline_references(content: &str) -> Vec<String> {
    let mut references: Vec<String> = Vec::new();

    for (open, close) in [("<<", ">>"), ("[[", "]]")] {
        let mut rest = content;
        while let Some(start) = rest.find(open) {
            let after = &rest[start + open.len()..];
            let Some(end) = after.find(close) else {
                break;
            };

            let name = after[..end].trim();
            if !name.is_empty()
                && !references
                    .iter()
                    .any(|existing| existing.eq_ignore_ascii_case(name))
            {
                references.push(name.to_string());
            }
            rest = &after[end + close.len()..];
        }
    }

    references.truncate(MAX_INLINE_REFERENCES);
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_reference_styles() {
        let refs = extract_inline_references(
            "I'd pair <<Lightning Bolt>> with [[Giant Growth]] here.",
        );
        assert_eq!(refs, vec!["Lightning Bolt", "Giant Growth"]);
    }

    #[test]
    fn deduplicates_case_insensitively() {
        let refs = extract_inline_references("<<Shock>> then <<SHOCK>> then [[shock]]");
        assert_eq!(refs, vec!["Shock"]);
    }

    #[test]
    fn caps_the_number_of_references() {
        let refs = extract_inline_references("<<a>> <<b>> <<c>> <<d>> <<e>>");
        assert_eq!(refs.len(), MAX_INLINE_REFERENCES);
    }

    #[test]
    fn ignores_empty_and_unterminated_references() {
        assert!(extract_inline_references("<<>> and [[  ]]").is_empty());
        assert!(extract_inline_references("a << dangling reference").is_empty());
        assert!(extract_inline_references("no references at all").is_empty());
    }
}
