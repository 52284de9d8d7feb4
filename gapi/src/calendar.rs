use crate::{Client, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub single_events: bool,
    pub order_by: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl EventsQuery {
    pub fn window(time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> Self {
        Self {
            time_min,
            time_max,
            single_events: true,
            order_by: "startTime",
            page_token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<Event>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    pub location: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

/// Either a timed instant with its own UTC offset, or a bare date for
/// all-day events.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: Option<DateTime<FixedOffset>>,
    pub date: Option<NaiveDate>,
}

impl Event {
    pub fn is_timed(&self) -> bool {
        self.start.date_time.is_some() && self.end.date_time.is_some()
    }

    /// Wall-clock duration in fractional hours, decomposed as
    /// `h + m/60 + s/3600`. All-day events have no duration.
    pub fn duration_hours(&self) -> Option<f64> {
        let start = self.start.date_time?;
        let end = self.end.date_time?;
        let seconds = (end - start).num_seconds().max(0);
        let (hours, minutes, seconds) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
        Some(hours as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0)
    }
}

/// List all events overlapping `[time_min, time_max)` on one calendar,
/// following pagination until exhausted.
pub async fn list(
    client: &Client,
    calendar_id: &str,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let path = format!("/calendars/{calendar_id}/events");
    let mut query = EventsQuery::window(time_min, time_max);
    let mut events = Vec::new();

    loop {
        let response: EventsResponse = client.fetch_calendar(&path, &query).await?;
        events.extend(response.items);
        match response.next_page_token {
            Some(token) => query.page_token = Some(token),
            None => break,
        }
    }

    Ok(events)
}

/// Union of events across several calendars.
pub async fn list_all(
    client: &Client,
    calendar_ids: &[String],
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for calendar_id in calendar_ids {
        events.extend(list(client, calendar_id, time_min, time_max).await?);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_event(start: &str, end: &str) -> Event {
        serde_json::from_value(serde_json::json!({
            "id": "evt",
            "summary": "Jane Doe and Tutor Bob - session",
            "start": { "dateTime": start },
            "end": { "dateTime": end },
        }))
        .expect("event")
    }

    #[test]
    fn duration_decomposes_to_fractional_hours() {
        let event = timed_event("2026-03-02T10:00:00-05:00", "2026-03-02T11:30:00-05:00");
        assert_eq!(event.duration_hours(), Some(1.5));

        let event = timed_event("2026-03-02T10:00:00-05:00", "2026-03-02T10:45:30-05:00");
        let hours = event.duration_hours().expect("duration");
        assert!((hours - (45.0 / 60.0 + 30.0 / 3600.0)).abs() < 1e-9);
    }

    #[test]
    fn all_day_events_have_no_duration() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "summary": "SAT test day",
            "start": { "date": "2026-03-14" },
            "end": { "date": "2026-03-15" },
        }))
        .expect("event");

        assert!(!event.is_timed());
        assert_eq!(event.duration_hours(), None);
    }

    #[test]
    fn event_times_keep_their_own_offset() {
        let event = timed_event("2026-03-02T10:00:00-05:00", "2026-03-02T11:00:00-05:00");
        let start = event.start.date_time.expect("start");
        assert_eq!(start.offset().local_minus_utc(), -5 * 3600);
    }
}
