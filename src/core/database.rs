use crate::core::config::DatabaseConfig;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// Connect to MongoDB and verify the deployment answers a ping.
pub async fn connect(config: &DatabaseConfig) -> Result<(Client, Database), mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some("emogo-backend".to_string());
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);

    let client = Client::with_options(options)?;
    let database = client.database(&config.name);
    database.run_command(doc! { "ping": 1 }).await?;

    Ok((client, database))
}
