use crate::{
    email::{name_list, Mailer},
    Context, Result,
};
use gapi::sheets;

/// Students at or below this many unused prepaid hours get flagged.
pub const LOW_HOURS_THRESHOLD: f64 = 1.5;

pub const NAME_COLUMN: usize = 0;
pub const HOURS_COLUMN: usize = 1;
pub const STATUS_COLUMN: usize = 14;

/// Scan summary rows for active students running low on prepaid hours.
/// Rows missing a name, an hours figure, or an "Active" status are skipped,
/// header row included.
pub fn low_hours(rows: &[Vec<serde_json::Value>]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| {
            let name = cell_str(row, NAME_COLUMN)?;
            let hours = cell_f64(row, HOURS_COLUMN)?;
            let status = cell_str(row, STATUS_COLUMN)?;
            (status == "Active" && hours <= LOW_HOURS_THRESHOLD).then(|| name.to_string())
        })
        .collect()
}

fn cell_str(row: &[serde_json::Value], column: usize) -> Option<&str> {
    row.get(column)?.as_str()
}

/// Sheet cells arrive as strings even when they hold numbers.
fn cell_f64(row: &[serde_json::Value], column: usize) -> Option<f64> {
    let cell = row.get(column)?;
    cell.as_f64()
        .or_else(|| cell.as_str().and_then(|raw| raw.trim().parse().ok()))
}

#[tracing::instrument(skip_all, name = "sheets_report")]
pub async fn run(
    google: &gapi::Client,
    mailer: &Mailer,
    spreadsheet_id: &str,
    range: &str,
) -> Result<Vec<String>> {
    let values = sheets::values(google, spreadsheet_id, range)
        .await
        .context("reading spreadsheet values")?;
    let flagged = low_hours(&values.values);
    if flagged.is_empty() {
        tracing::info!("no students below the hours threshold");
        return Ok(flagged);
    }

    let body = format!(
        "Active students with {LOW_HOURS_THRESHOLD} or fewer prepaid hours \
         remaining: {}<br/><br/>\
         Consider sending a top-up reminder.",
        name_list(&flagged)
    );
    mailer
        .send(mailer.admin_message("Students low on hours").html(body))
        .await
        .context("sending low hours report")?;
    tracing::info!(flagged = flagged.join(", "), "low hours report sent");
    Ok(flagged)
}
