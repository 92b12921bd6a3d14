use anyhow::Result;

use super::Clients;
use crate::config::AppConfig;

/// Verify the Notion token and database id by reading the database.
pub async fn run(cfg: &AppConfig) -> Result<()> {
    let clients = Clients::from_config(cfg)?;
    let info = clients.syncer().check_connection().await?;

    println!(
        "Connected to database: {}",
        info.title.as_deref().unwrap_or("Untitled")
    );
    println!("Properties: {}", info.property_names.join(", "));
    Ok(())
}
