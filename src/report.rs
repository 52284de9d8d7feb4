use crate::{
    email::{name_list, Mailer},
    matching::MatchStudents,
    Context, Result,
};
use chrono::{DateTime, Duration, Utc};
use db::{student, tutor, Student, Tutor};
use gapi::calendar::{self, Event};
use itertools::Itertools;
use mailjet::send::Message;
use sqlx::SqlitePool;
use std::collections::HashMap;

pub const WEEK_WINDOW_DAYS: i64 = 7;
/// Events past the week window still tell us a student is scheduled, just
/// later; scan far enough ahead to see them.
pub const FUTURE_WINDOW_DAYS: i64 = 28;

#[derive(Debug, Default, PartialEq, serde::Serialize)]
pub struct TutorTally {
    pub session_count: u32,
    pub total_hours: f64,
    pub unscheduled: Vec<String>,
}

#[derive(Debug, Default, PartialEq, serde::Serialize)]
pub struct WeekSummary {
    /// Students of the business owner.
    pub primary: TutorTally,
    /// Students of outsourced tutors.
    pub outsourced: TutorTally,
    /// Active students whose next session is beyond the week window.
    pub future: Vec<String>,
    /// Paused students, listed without a scheduling check.
    pub paused: Vec<String>,
}

/// Classify every active student against the fetched events. Each student
/// lands in exactly one place: a tally (scheduled this week), the future
/// list, or an unscheduled list.
pub fn summarize(
    active: &[Student],
    paused: &[Student],
    tutors: &HashMap<i64, Tutor>,
    events: &[Event],
    week_end: DateTime<Utc>,
    matcher: &impl MatchStudents,
) -> WeekSummary {
    let mut summary = WeekSummary {
        paused: paused.iter().map(Student::display_name).collect(),
        ..Default::default()
    };

    for student in active {
        let is_primary = tutors
            .get(&student.tutor_id)
            .map(|tutor| tutor.is_primary)
            .unwrap_or(false);
        let tally = if is_primary {
            &mut summary.primary
        } else {
            &mut summary.outsourced
        };

        let matched = events
            .iter()
            .filter(|event| event.is_timed() && matcher.matches(&event.summary, student))
            .collect_vec();
        let this_week = matched
            .iter()
            .filter(|event| starts_before(event, week_end))
            .copied()
            .collect_vec();

        if !this_week.is_empty() {
            tally.session_count += this_week.len() as u32;
            tally.total_hours += this_week
                .iter()
                .filter_map(|event| event.duration_hours())
                .sum::<f64>();
        } else if !matched.is_empty() {
            summary.future.push(student.display_name());
        } else {
            tally.unscheduled.push(student.display_name());
        }
    }

    summary
}

fn starts_before(event: &Event, cutoff: DateTime<Utc>) -> bool {
    event
        .start
        .date_time
        .map(|start| start.with_timezone(&Utc) < cutoff)
        .unwrap_or(false)
}

#[tracing::instrument(skip_all, name = "weekly_report")]
pub async fn run(
    db: &SqlitePool,
    google: &gapi::Client,
    mailer: &Mailer,
    matcher: &impl MatchStudents,
    calendars: &[String],
) -> Result<WeekSummary> {
    let now = Utc::now();
    let events = calendar::list_all(
        google,
        calendars,
        now,
        now + Duration::days(FUTURE_WINDOW_DAYS),
    )
    .await
    .context("listing calendar events")?;

    let active = student::active(db).await?;
    let paused = student::paused(db).await?;
    let tutors = tutor::by_ids(db).await?;

    let summary = summarize(
        &active,
        &paused,
        &tutors,
        &events,
        now + Duration::days(WEEK_WINDOW_DAYS),
        matcher,
    );

    mailer
        .send(render(mailer, &summary))
        .await
        .context("sending weekly report")?;
    tracing::info!(
        sessions = summary.primary.session_count + summary.outsourced.session_count,
        unscheduled = summary.primary.unscheduled.len() + summary.outsourced.unscheduled.len(),
        "weekly report sent"
    );

    Ok(summary)
}

pub fn render(mailer: &Mailer, summary: &WeekSummary) -> Message {
    let body = format!(
        "Sessions scheduled over the next {WEEK_WINDOW_DAYS} days:<br/>\
         {} sessions ({:.2} hours) with Open Path students<br/>\
         {} sessions ({:.2} hours) with outsourced students<br/><br/>\
         Active students with no session scheduled: {}<br/>\
         Outsourced students with no session scheduled: {}<br/><br/>\
         Students scheduled beyond {WEEK_WINDOW_DAYS} days: {}<br/>\
         Paused students: {}",
        summary.primary.session_count,
        summary.primary.total_hours,
        summary.outsourced.session_count,
        summary.outsourced.total_hours,
        name_list(&summary.primary.unscheduled),
        name_list(&summary.outsourced.unscheduled),
        name_list(&summary.future),
        name_list(&summary.paused),
    );

    mailer.admin_message("Weekly tutoring summary").html(body)
}
