use crate::config::Settings;
use crate::logging::mask_connection_password;
use anyhow::Context;
use mongodb::{bson::doc, options::ClientOptions, Client};

// Connect to MongoDB and verify the connection with a ping
pub async fn connect_mongodb(settings: &Settings) -> anyhow::Result<Client> {
    let uri = settings.mongo_uri();
    tracing::info!("Connecting to MongoDB at {}", mask_connection_password(&uri));

    let mut options = ClientOptions::parse(&uri)
        .await
        .context("Failed to parse MongoDB connection options")?;
    // Add connection timeout to prevent hanging
    options.connect_timeout = Some(settings.timeout());
    options.server_selection_timeout = Some(settings.timeout());

    let client = Client::with_options(options).context("Failed to create MongoDB client")?;

    client
        .database(&settings.data.database)
        .run_command(doc! { "ping": 1 })
        .await
        .context("Failed to ping MongoDB")?;
    tracing::debug!("MongoDB connection verified");

    Ok(client)
}
