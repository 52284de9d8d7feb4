use crate::Result;
use sqlx::{sqlite::Sqlite, SqliteExecutor};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Status {
    Active,
    Paused,
    Inactive,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_email: Option<String>,
    pub timezone: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: Status,
    pub tutor_id: i64,
}

impl Student {
    /// Display name as it appears in calendar event titles. A missing last
    /// name is tolerated.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }
}

const FETCH_STUDENT_QUERY: &str = r#"
    SELECT
        id,
        first_name,
        last_name,
        email,
        parent_email,
        secondary_email,
        timezone,
        location,
        status,
        tutor_id
    FROM
        students
"#;

fn fetch_student_query<'builder>() -> sqlx::QueryBuilder<'builder, Sqlite> {
    sqlx::QueryBuilder::new(FETCH_STUDENT_QUERY)
}

pub async fn all<'c, E>(exec: E) -> Result<Vec<Student>>
where
    E: SqliteExecutor<'c>,
{
    let students = fetch_student_query()
        .push("ORDER BY id DESC")
        .build_query_as::<Student>()
        .fetch_all(exec)
        .await?;

    Ok(students)
}

pub async fn by_status<'c, E>(exec: E, status: Status) -> Result<Vec<Student>>
where
    E: SqliteExecutor<'c>,
{
    let students = fetch_student_query()
        .push("WHERE status = ")
        .push_bind(status)
        .push(" ORDER BY id DESC")
        .build_query_as::<Student>()
        .fetch_all(exec)
        .await?;

    Ok(students)
}

pub async fn active<'c, E>(exec: E) -> Result<Vec<Student>>
where
    E: SqliteExecutor<'c>,
{
    by_status(exec, Status::Active).await
}

pub async fn paused<'c, E>(exec: E) -> Result<Vec<Student>>
where
    E: SqliteExecutor<'c>,
{
    by_status(exec, Status::Paused).await
}

pub async fn by_id<'c, E>(exec: E, id: i64) -> Result<Option<Student>>
where
    E: SqliteExecutor<'c>,
{
    let student = fetch_student_query()
        .push("WHERE id = ")
        .push_bind(id)
        .build_query_as::<Student>()
        .fetch_optional(exec)
        .await?;

    Ok(student)
}
