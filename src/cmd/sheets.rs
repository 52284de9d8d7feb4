use crate::{cmd::print_json, settings::Settings, sheets_report, Context, Result};

/// Send the low prepaid hours report from the summary spreadsheet
#[derive(Debug, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let spreadsheet_id = settings
            .google
            .spreadsheet_id
            .as_deref()
            .context("no spreadsheet configured")?;
        let google = settings.google.client().await?;
        let mailer = settings.mailjet.mailer()?;

        let flagged = sheets_report::run(
            &google,
            &mailer,
            spreadsheet_id,
            &settings.google.summary_range,
        )
        .await?;
        print_json(&flagged)
    }
}
