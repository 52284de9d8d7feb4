use crate::{
    matching::NameDelimiterMatcher, quotes, reminders, report, settings::Settings, sheets_report,
    test_dates, Result,
};
use chrono::{Datelike, Utc};

/// The daily batch: session reminders and the test date sweep every day,
/// the weekly and spreadsheet reports on the configured weekday.
#[tracing::instrument(skip_all, name = "daily")]
pub async fn daily(settings: &Settings) -> Result {
    let db = settings.db.connect().await?;
    let google = settings.google.client().await?;
    let mailer = settings.mailjet.mailer()?;
    let matcher = NameDelimiterMatcher;
    let today = Utc::now().date_naive();

    let quote = quotes::fetch(&reqwest::Client::new(), &settings.quote_url).await;
    reminders::run(
        &db,
        &google,
        &mailer,
        &matcher,
        &settings.google.calendars,
        &quote,
    )
    .await?;

    test_dates::sweep(&db, &mailer, today).await?;

    if today.weekday() == settings.report.weekly_day {
        report::run(&db, &google, &mailer, &matcher, &settings.google.calendars).await?;
        if let Some(spreadsheet_id) = &settings.google.spreadsheet_id {
            sheets_report::run(
                &google,
                &mailer,
                spreadsheet_id,
                &settings.google.summary_range,
            )
            .await?;
        }
    }

    Ok(())
}
