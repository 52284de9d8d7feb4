use crate::{cmd::print_json, settings::Settings, test_dates, Result};
use chrono::{NaiveDate, Utc};

/// Sweep test dates: send deadline reminders and mark finished dates past
#[derive(Debug, clap::Args)]
pub struct Cmd {
    /// Sweep as if run on this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let db = settings.db.connect().await?;
        let mailer = settings.mailjet.mailer()?;
        let today = self.date.unwrap_or_else(|| Utc::now().date_naive());

        let notified = test_dates::sweep(&db, &mailer, today).await?;
        print_json(&notified)
    }
}
