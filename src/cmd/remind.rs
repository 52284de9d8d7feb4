use crate::{
    cmd::print_json, matching::NameDelimiterMatcher, quotes, reminders, settings::Settings, Result,
};

/// Send session reminders for events roughly two days out
#[derive(Debug, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let db = settings.db.connect().await?;
        let google = settings.google.client().await?;
        let mailer = settings.mailjet.mailer()?;
        let quote = quotes::fetch(&reqwest::Client::new(), &settings.quote_url).await;

        let reminded = reminders::run(
            &db,
            &google,
            &mailer,
            &NameDelimiterMatcher,
            &settings.google.calendars,
            &quote,
        )
        .await?;
        print_json(&reminded)
    }
}
