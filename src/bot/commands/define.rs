use crate::bot::{Context, Error};
use crate::utils::format::{create_error_embed, create_info_embed};

/// Look up a glossary definition
#[poise::command(slash_command)]
pub async fn define(
    ctx: Context<'_>,
    #[description = "Game term to define"] term: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    match registries.definitions.find(&term) {
        Some(definition) => {
            let embed = create_info_embed(&definition.term, &definition.text);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            let embed = create_error_embed(
                "Term not found",
                &format!("No glossary entry found for \"{term}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}
