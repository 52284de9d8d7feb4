use crate::{cron, settings::Settings, Error, Result};
use tokio_graceful_shutdown::{SubsystemBuilder, SubsystemHandle, Toplevel};

/// Run the scheduler, firing the daily batch until shut down
#[derive(Debug, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let settings = settings.clone();
        Toplevel::new(move |top_level: SubsystemHandle| async move {
            top_level.start(SubsystemBuilder::new("cron", {
                move |handle| cron::subsystem(settings, handle)
            }));
        })
        .catch_signals()
        .handle_shutdown_requests(tokio::time::Duration::from_secs(5))
        .await
        .map_err(Error::from)
    }
}
