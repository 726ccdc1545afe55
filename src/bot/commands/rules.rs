use crate::bot::{Context, Error};
use crate::registry::infraction_guide::InfractionGuide;
use crate::utils::format::{create_error_embed, create_info_embed, truncate};

/// Look up a comprehensive rule by number
#[poise::command(slash_command)]
pub async fn rule(
    ctx: Context<'_>,
    #[description = "Rule number, e.g. 601.2a"] number: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;
    let rules = &registries.comprehensive_rules;

    match rules.get(&number) {
        Some(rule) => {
            let mut description = rule.text.clone();

            let children = rules.children(&rule.number);
            if !children.is_empty() {
                description.push('\n');
                for child in children {
                    description.push_str(&format!(
                        "\n**{}** {}",
                        child.number,
                        truncate(&child.text, 200)
                    ));
                }
            }

            let embed = create_info_embed(&format!("CR {}", rule.number), &description);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            let embed = create_error_embed(
                "Rule not found",
                &format!("No comprehensive rule numbered \"{number}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Look up a tournament rules section
#[poise::command(slash_command)]
pub async fn mtr(
    ctx: Context<'_>,
    #[description = "Section number or title"] query: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    match registries.tournament_rules.find(&query) {
        Some(section) => {
            let embed = create_info_embed(
                &format!("MTR {} {}", section.number, section.title),
                &section.body,
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            let embed = create_error_embed(
                "Section not found",
                &format!("No tournament rules section matching \"{query}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Look up an infraction in the procedure guide
#[poise::command(slash_command)]
pub async fn ipg(
    ctx: Context<'_>,
    #[description = "Section number or infraction name"] query: String,
) -> Result<(), Error> {
    let registries = &ctx.data().registries;

    match registries.infraction_guide.find(&query) {
        Some(section) => {
            let mut embed = create_info_embed(
                &format!("IPG {} {}", section.number, section.title),
                &section.body,
            );
            if let Some(penalty) = InfractionGuide::penalty_of(section) {
                embed = embed.field("Penalty", penalty, true);
            }
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            let embed = create_error_embed(
                "Infraction not found",
                &format!("No infraction guide section matching \"{query}\"."),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}
