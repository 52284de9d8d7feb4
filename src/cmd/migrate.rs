use crate::{settings::Settings, Result};

/// Create the database schema if it does not exist
#[derive(Debug, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let db = settings.db.connect().await?;
        db::schema::migrate(&db).await?;
        Ok(())
    }
}
