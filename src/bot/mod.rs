pub mod commands;
pub mod handlers;

use std::sync::Arc;

use crate::config::Config;
use crate::database::{self, Database};
use crate::registry::{self, Registries};
use anyhow::Result;
use poise::serenity_prelude as serenity;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Everything the event handler and commands work against. Built once in
/// [`create_bot`] and owned by the framework; there is no global lookup.
pub struct Data {
    pub db: Database,
    pub registries: Arc<Registries>,
    pub config: Config,
}

pub async fn create_bot(config: Config) -> Result<serenity::Client> {
    let db = database::connect(&config)?;

    let http = reqwest::Client::builder()
        .user_agent("discord-grimoire")
        .build()?;
    let registries = Arc::new(registry::load_all(&http).await);

    let data = Data {
        db,
        registries,
        config: config.clone(),
    };

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::card::card(),
                commands::card::price(),
                commands::card::set(),
                commands::card::token(),
                commands::define::define(),
                commands::rules::rule(),
                commands::rules::mtr(),
                commands::rules::ipg(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.bot_token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}

/// Login failures that warrant a tailored log line and exit code 1. Anything
/// else propagates to the caller untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidToken,
    RateLimited,
    Interrupted,
}

impl LoginFailure {
    pub fn classify(error: &serenity::Error) -> Option<Self> {
        match error {
            serenity::Error::Gateway(serenity::GatewayError::InvalidAuthentication) => {
                Some(LoginFailure::InvalidToken)
            }
            serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) => {
                match response.status_code.as_u16() {
                    401 | 403 => Some(LoginFailure::InvalidToken),
                    429 => Some(LoginFailure::RateLimited),
                    _ => None,
                }
            }
            serenity::Error::Http(
                serenity::HttpError::RateLimitI64F64 | serenity::HttpError::RateLimitUtf8,
            ) => Some(LoginFailure::RateLimited),
            serenity::Error::Io(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Some(LoginFailure::Interrupted)
            }
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::InvalidToken => "Could not log in to Discord. Quitting...",
            LoginFailure::RateLimited => {
                "Walked into a rate limit while logging in. Please try again later. Quitting..."
            }
            LoginFailure::Interrupted => "Login procedure was interrupted. Quitting...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn classifies_the_three_fatal_login_categories() {
        let auth = serenity::Error::Gateway(serenity::GatewayError::InvalidAuthentication);
        let rate = serenity::Error::Http(serenity::HttpError::RateLimitI64F64);
        let interrupted = serenity::Error::Io(io::Error::from(io::ErrorKind::Interrupted));

        assert_eq!(
            LoginFailure::classify(&auth),
            Some(LoginFailure::InvalidToken)
        );
        assert_eq!(
            LoginFailure::classify(&rate),
            Some(LoginFailure::RateLimited)
        );
        assert_eq!(
            LoginFailure::classify(&interrupted),
            Some(LoginFailure::Interrupted)
        );
    }

    #[test]
    fn each_category_has_its_own_message() {
        let messages = [
            LoginFailure::InvalidToken.message(),
            LoginFailure::RateLimited.message(),
            LoginFailure::Interrupted.message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unrelated_errors_are_not_classified() {
        let other = serenity::Error::Other("gateway fell over");
        let io = serenity::Error::Io(io::Error::from(io::ErrorKind::NotFound));

        assert_eq!(LoginFailure::classify(&other), None);
        assert_eq!(LoginFailure::classify(&io), None);
    }
}
