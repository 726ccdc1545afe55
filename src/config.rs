use anyhow::Result;
use std::env;

/// Placeholder port meaning "not configured"; the driver default applies.
pub const UNSET_PORT: i32 = -1;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub mongo_host: String,
    pub mongo_port: i32,
    pub mongo_db: String,
    pub mongo_user: Option<String>,
    pub mongo_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = var("BOT_TOKEN")
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN environment variable is required"))?;

        let mongo_host = var("MONGO_HOST").unwrap_or_else(|| "localhost".to_string());
        let mongo_port = parse_port(var("MONGO_PORT").as_deref());
        let mongo_db = var("MONGO_DB").unwrap_or_else(|| "grimoire".to_string());
        let mongo_user = var("MONGO_USER");
        let mongo_password = var("MONGO_PASSWORD");

        Ok(Config {
            bot_token,
            mongo_host,
            mongo_port,
            mongo_db,
            mongo_user,
            mongo_password,
        })
    }

    /// Port to hand to the database driver, or `None` when unset so the
    /// driver default applies.
    pub fn mongo_port(&self) -> Option<u16> {
        u16::try_from(self.mongo_port).ok()
    }
}

fn parse_port(raw: Option<&str>) -> i32 {
    let Some(text) = raw else {
        return UNSET_PORT;
    };

    match text.trim().parse::<u16>() {
        Ok(port) => i32::from(port),
        Err(_) => {
            tracing::warn!(
                "MONGO_PORT value {:?} is not a valid port, falling back to the driver default",
                text
            );
            UNSET_PORT
        }
    }
}
