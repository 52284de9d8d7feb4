use crate::{email::Mailer, matching::MatchStudents, quotes::Quote, tz, Context, Result};
use chrono::{Duration, Utc};
use db::{student, tutor, Student, Tutor};
use gapi::calendar::{self, Event};
use mailjet::send::{Message, Recipient};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Sessions roughly two days out get a reminder: the scan window opens 44
/// hours ahead and closes 68 hours ahead, so a daily run covers every
/// session exactly once.
pub const WINDOW_START_HOURS: i64 = 44;
pub const WINDOW_END_HOURS: i64 = 68;

#[tracing::instrument(skip_all, name = "reminders")]
pub async fn run(
    db: &SqlitePool,
    google: &gapi::Client,
    mailer: &Mailer,
    matcher: &impl MatchStudents,
    calendars: &[String],
    quote: &Quote,
) -> Result<Vec<String>> {
    let now = Utc::now();
    let time_min = now + Duration::hours(WINDOW_START_HOURS);
    let time_max = now + Duration::hours(WINDOW_END_HOURS);

    tracing::info!(%time_min, %time_max, "fetching events for session reminders");
    let events = calendar::list_all(google, calendars, time_min, time_max)
        .await
        .context("listing calendar events")?;
    let students = student::active(db).await?;
    let tutors: HashMap<i64, Tutor> = tutor::by_ids(db).await?;

    let mut reminded = Vec::new();
    for event in events.iter().filter(|event| event.is_timed()) {
        for student in matcher.matched(&event.summary, &students) {
            let tutor = tutors.get(&student.tutor_id);
            let message = render(mailer, event, student, tutor, quote)?;
            match mailer.send(message).await {
                Ok(()) => reminded.push(student.display_name()),
                Err(err) => tracing::error!(
                    student = %student.display_name(),
                    event = %event.summary,
                    ?err,
                    "failed to send session reminder"
                ),
            }
        }
    }

    if reminded.is_empty() {
        tracing::info!("no reminders sent");
    } else {
        tracing::info!(reminded = reminded.join(", "), "reminders sent");
    }
    Ok(reminded)
}

/// Build the reminder email for one event/student pair. Times are shifted
/// from the tutor's zone into the student's; the location falls back to the
/// student's stored location.
pub fn render(
    mailer: &Mailer,
    event: &Event,
    student: &Student,
    tutor: Option<&Tutor>,
    quote: &Quote,
) -> Result<Message> {
    let start = event.start.date_time.context("event start has no time")?;
    let end = event.end.date_time.context("event end has no time")?;

    let offset = tz::display_offset(student.timezone, tutor.map(|t| t.timezone).unwrap_or(0));
    let start = start + offset;
    let end = end + offset;

    let when = format!(
        "{} from {} to {} {}",
        tz::format_long_date(&start),
        tz::format_clock(&start),
        tz::format_clock(&end),
        tz::zone_phrase(student.timezone)
    );

    let location_line = event
        .location
        .as_deref()
        .or(student.location.as_deref())
        .map(|location| format!("Location: {location}<br/><br/>"))
        .unwrap_or_default();

    let body = format!(
        "Hello, this is an automated reminder that a tutoring session is scheduled on \
         {when}.<br/><br/>\
         {location_line}\
         You are welcome to reply to this email with any questions. Please provide at \
         least 24 hours notice when cancelling or rescheduling in order to avoid losing \
         the session.<br/><br/>\
         {}<br/><br/>\
         {}",
        quote.html(),
        mailer.signature(),
    );

    let reply_to = tutor
        .map(|tutor| tutor.email.clone())
        .unwrap_or_else(|| mailer.support_email().to_string());

    let mut message = mailer
        .message(format!("Reminder for {}", event.summary))
        .to(Recipient::new(&student.email))
        .reply_to(Recipient::new(reply_to));
    if let Some(parent_email) = &student.parent_email {
        message = message.cc(Recipient::new(parent_email));
    }
    if let Some(secondary_email) = &student.secondary_email {
        message = message.cc(Recipient::new(secondary_email));
    }
    if let Some(tutor) = tutor {
        message = message.cc(Recipient::new(&tutor.email));
    }

    Ok(message.html(body))
}
