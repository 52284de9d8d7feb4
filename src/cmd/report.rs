use crate::{cmd::print_json, matching::NameDelimiterMatcher, report, settings::Settings, Result};

/// Send the weekly scheduling summary, regardless of the configured weekday
#[derive(Debug, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let db = settings.db.connect().await?;
        let google = settings.google.client().await?;
        let mailer = settings.mailjet.mailer()?;

        let summary = report::run(
            &db,
            &google,
            &mailer,
            &NameDelimiterMatcher,
            &settings.google.calendars,
        )
        .await?;
        print_json(&summary)
    }
}
