mod bot;
mod config;
mod database;
mod registry;
mod utils;

use anyhow::Result;
use bot::LoginFailure;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "discord_grimoire=info,poise=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The token check runs before any database handle or network activity.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}. Quitting...");
            std::process::exit(1);
        }
    };

    let mut client = bot::create_bot(config).await?;

    tracing::info!("Logging in to Discord...");

    if let Err(why) = client.start().await {
        if let Some(failure) = LoginFailure::classify(&why) {
            tracing::error!("{}", failure.message());
            std::process::exit(1);
        }
        return Err(why.into());
    }

    Ok(())
}
