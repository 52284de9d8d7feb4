use crate::{student::Status, Result};
use sqlx::{sqlite::Sqlite, SqliteExecutor};
use std::collections::HashMap;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Tutor {
    pub id: i64,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    pub timezone: i32,
    pub status: Status,
    /// The business owner, as opposed to an outsourced tutor.
    pub is_primary: bool,
}

impl Tutor {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }
}

const FETCH_TUTOR_QUERY: &str = r#"
    SELECT
        id,
        first_name,
        last_name,
        email,
        timezone,
        status,
        is_primary
    FROM
        tutors
"#;

fn fetch_tutor_query<'builder>() -> sqlx::QueryBuilder<'builder, Sqlite> {
    sqlx::QueryBuilder::new(FETCH_TUTOR_QUERY)
}

pub async fn all<'c, E>(exec: E) -> Result<Vec<Tutor>>
where
    E: SqliteExecutor<'c>,
{
    let tutors = fetch_tutor_query()
        .push("ORDER BY id")
        .build_query_as::<Tutor>()
        .fetch_all(exec)
        .await?;

    Ok(tutors)
}

pub async fn by_id<'c, E>(exec: E, id: i64) -> Result<Option<Tutor>>
where
    E: SqliteExecutor<'c>,
{
    let tutor = fetch_tutor_query()
        .push("WHERE id = ")
        .push_bind(id)
        .build_query_as::<Tutor>()
        .fetch_optional(exec)
        .await?;

    Ok(tutor)
}

/// Tutors keyed by id, for joining against `Student::tutor_id` in memory.
pub async fn by_ids<'c, E>(exec: E) -> Result<HashMap<i64, Tutor>>
where
    E: SqliteExecutor<'c>,
{
    let tutors = all(exec).await?;
    Ok(tutors.into_iter().map(|tutor| (tutor.id, tutor)).collect())
}
