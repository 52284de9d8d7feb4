//! Timezone display arithmetic.
//!
//! Student and tutor timezones are small signed integers relative to the
//! business's reference zone, not real IANA zones. Event times come from the
//! calendar in the tutor's zone; shifting by (student − tutor) hours yields
//! the student-local display time.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike};

/// Region label for a student's timezone integer. Lossy and tutor-relative
/// by design; unknown offsets get the generic label.
pub fn region_label(offset: i32) -> &'static str {
    match offset {
        -2 => "Pacific",
        -1 => "Mountain",
        0 => "Central",
        1 => "Eastern",
        _ => "your",
    }
}

/// Phrase used after the session times in reminder emails.
pub fn zone_phrase(offset: i32) -> String {
    match region_label(offset) {
        "your" => "your time zone".to_string(),
        region => format!("{region} time"),
    }
}

/// Correction applied to a tutor-local event time to display it
/// student-local.
pub fn display_offset(student_tz: i32, tutor_tz: i32) -> Duration {
    Duration::hours(i64::from(student_tz) - i64::from(tutor_tz))
}

/// "4:05pm"
pub fn format_clock(time: &DateTime<FixedOffset>) -> String {
    let (is_pm, hour) = time.hour12();
    format!(
        "{hour}:{:02}{}",
        time.minute(),
        if is_pm { "pm" } else { "am" }
    )
}

/// "Monday, Mar 2 2026"
pub fn format_long_date(time: &DateTime<FixedOffset>) -> String {
    format!(
        "{}, {} {} {}",
        time.format("%A"),
        time.format("%b"),
        time.day(),
        time.year()
    )
}
