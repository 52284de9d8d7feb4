use crate::{job, settings::Settings, Result};

/// Run the full daily batch once and exit
#[derive(Debug, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        job::daily(settings).await
    }
}
