use crate::{email::Mailer, Result};
use chrono::{Duration, NaiveDate};
use db::{
    test_date::{self, TestDate, TrackingStudent},
    Student,
};
use mailjet::send::{Message, Recipient};
use sqlx::SqlitePool;

pub const REGISTRATION_LEAD_DAYS: i64 = 5;
pub const LATE_REGISTRATION_LEAD_DAYS: i64 = 5;
pub const TEST_LEAD_DAYS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    Registration,
    LateRegistration,
    Test,
}

/// Deadlines whose reminder falls due today. A sweep that runs daily hits
/// each lead date exactly once; nothing fires for a date already swept past.
pub fn due_deadlines(test_date: &TestDate, today: NaiveDate) -> Vec<Deadline> {
    let mut due = Vec::new();
    if test_date.registration_deadline - Duration::days(REGISTRATION_LEAD_DAYS) == today {
        due.push(Deadline::Registration);
    }
    if test_date.late_registration_deadline - Duration::days(LATE_REGISTRATION_LEAD_DAYS) == today {
        due.push(Deadline::LateRegistration);
    }
    if test_date.date - Duration::days(TEST_LEAD_DAYS) == today {
        due.push(Deadline::Test);
    }
    due
}

/// Registration nudges are pointless for students already registered; the
/// test-week reminder goes to everyone tracking the date.
pub fn should_notify(deadline: Deadline, tracking: &TrackingStudent) -> bool {
    match deadline {
        Deadline::Registration | Deadline::LateRegistration => !tracking.registered,
        Deadline::Test => true,
    }
}

#[tracing::instrument(skip_all, name = "test_dates")]
pub async fn sweep(db: &SqlitePool, mailer: &Mailer, today: NaiveDate) -> Result<Vec<String>> {
    let mut notified = Vec::new();
    for test_date in test_date::upcoming(db).await? {
        if test_date.date <= today {
            test_date::mark_past(db, test_date.id).await?;
            tracing::info!(
                test = %test_date.test_type,
                date = %test_date.date,
                "test date marked past"
            );
            continue;
        }

        let due = due_deadlines(&test_date, today);
        if due.is_empty() {
            continue;
        }

        let tracking = test_date::tracking(db, test_date.id).await?;
        for deadline in due {
            for student in tracking.iter().filter(|t| should_notify(deadline, t)) {
                let message = render(mailer, &test_date, deadline, &student.student);
                match mailer.send(message).await {
                    Ok(()) => notified.push(student.student.display_name()),
                    Err(err) => tracing::error!(
                        student = %student.student.display_name(),
                        test = %test_date.test_type,
                        ?err,
                        "failed to send test date reminder"
                    ),
                }
            }
        }
    }

    if notified.is_empty() {
        tracing::info!("no test date reminders sent");
    } else {
        tracing::info!(notified = notified.join(", "), "test date reminders sent");
    }
    Ok(notified)
}

pub fn render(
    mailer: &Mailer,
    test_date: &TestDate,
    deadline: Deadline,
    student: &Student,
) -> Message {
    let test = test_date.test_type;
    let (subject, lead) = match deadline {
        Deadline::Registration => (
            format!("{test} registration deadline approaching"),
            format!(
                "The registration deadline for the {} {test} is {}, \
                 {REGISTRATION_LEAD_DAYS} days from now.",
                test_date.date, test_date.registration_deadline
            ),
        ),
        Deadline::LateRegistration => (
            format!("{test} late registration deadline approaching"),
            format!(
                "The late registration deadline for the {} {test} is {}, \
                 {LATE_REGISTRATION_LEAD_DAYS} days from now. This is the last \
                 chance to register.",
                test_date.date, test_date.late_registration_deadline
            ),
        ),
        Deadline::Test => (
            format!("{test} coming up on {}", test_date.date),
            format!(
                "The {test} is coming up on {}, {TEST_LEAD_DAYS} days from now. \
                 Get plenty of sleep this week and keep practice sessions light.",
                test_date.date
            ),
        ),
    };

    let body = format!(
        "Hello, this is an automated reminder from Open Path Tutoring.<br/><br/>\
         {lead}<br/><br/>\
         You are welcome to reply to this email with any questions.<br/><br/>\
         {}",
        mailer.signature(),
    );

    let mut message = mailer.message(subject).to(Recipient::new(&student.email));
    if let Some(parent_email) = &student.parent_email {
        message = message.cc(Recipient::new(parent_email));
    }
    message.html(body)
}
