use crate::config::Config;
use anyhow::Result;
use mongodb::Client;
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use tracing::info;

/// Handle on the MongoDB deployment. The driver connects lazily, so
/// constructing this performs no I/O; bad parameters surface on first use.
#[derive(Clone)]
pub struct Database {
    client: Client,
    name: String,
}

pub fn connect(config: &Config) -> Result<Database> {
    let address = ServerAddress::Tcp {
        host: config.mongo_host.clone(),
        port: config.mongo_port(),
    };

    let credential = config.mongo_user.as_ref().map(|user| {
        Credential::builder()
            .username(user.clone())
            .password(config.mongo_password.clone())
            .build()
    });

    let options = ClientOptions::builder()
        .hosts(vec![address])
        .credential(credential)
        .app_name("discord-grimoire".to_string())
        .build();

    let client = Client::with_options(options)?;
    info!(
        "Database handle created for {}:{}",
        config.mongo_host,
        config
            .mongo_port()
            .map_or_else(|| "default".to_string(), |port| port.to_string())
    );

    Ok(Database {
        client,
        name: config.mongo_db.clone(),
    })
}

impl Database {
    pub fn handle(&self) -> mongodb::Database {
        self.client.database(&self.name)
    }

    pub fn collection<T>(&self, name: &str) -> mongodb::Collection<T> {
        self.handle().collection(name)
    }
}
