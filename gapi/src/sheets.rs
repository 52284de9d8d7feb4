use crate::{Client, Result, NO_QUERY};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;

/// Everything a path segment cannot carry raw. Sheet names routinely hold
/// spaces, and nothing stops an operator from using '#' or '?'.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A block of cell values, as returned by `values.get`. Cells are
/// mixed-type; the sheet layout is the contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub major_dimension: String,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

pub async fn values(client: &Client, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
    let range = utf8_percent_encode(range, SEGMENT);
    let path = format!("/spreadsheets/{spreadsheet_id}/values/{range}");
    client.fetch_sheets(&path, NO_QUERY).await
}
