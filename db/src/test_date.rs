use crate::{Result, Student};
use chrono::NaiveDate;
use sqlx::{sqlite::Sqlite, SqliteExecutor};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TestType {
    Sat,
    Act,
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => f.write_str("SAT"),
            Self::Act => f.write_str("ACT"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TestDateStatus {
    Confirmed,
    Unconfirmed,
    Past,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TestDate {
    pub id: i64,
    pub test_type: TestType,
    pub date: NaiveDate,
    pub registration_deadline: NaiveDate,
    pub late_registration_deadline: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_release: Option<NaiveDate>,
    pub status: TestDateStatus,
}

/// A student tracking a test date, with their registration state.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TrackingStudent {
    #[sqlx(flatten)]
    pub student: Student,
    pub registered: bool,
}

const FETCH_TEST_DATE_QUERY: &str = r#"
    SELECT
        id,
        test_type,
        date,
        registration_deadline,
        late_registration_deadline,
        score_release,
        status
    FROM
        test_dates
"#;

fn fetch_test_date_query<'builder>() -> sqlx::QueryBuilder<'builder, Sqlite> {
    sqlx::QueryBuilder::new(FETCH_TEST_DATE_QUERY)
}

/// Test dates that have not yet been swept past.
pub async fn upcoming<'c, E>(exec: E) -> Result<Vec<TestDate>>
where
    E: SqliteExecutor<'c>,
{
    let dates = fetch_test_date_query()
        .push("WHERE status != ")
        .push_bind(TestDateStatus::Past)
        .push(" ORDER BY date")
        .build_query_as::<TestDate>()
        .fetch_all(exec)
        .await?;

    Ok(dates)
}

/// One-way transition; re-running on the same date is a no-op update.
pub async fn mark_past<'c, E>(exec: E, id: i64) -> Result<u64>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query("UPDATE test_dates SET status = ? WHERE id = ?")
        .bind(TestDateStatus::Past)
        .bind(id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected())
}

/// Students tracking the given test date.
pub async fn tracking<'c, E>(exec: E, test_date_id: i64) -> Result<Vec<TrackingStudent>>
where
    E: SqliteExecutor<'c>,
{
    let students = sqlx::query_as::<_, TrackingStudent>(
        r#"
        SELECT
            s.id,
            s.first_name,
            s.last_name,
            s.email,
            s.parent_email,
            s.secondary_email,
            s.timezone,
            s.location,
            s.status,
            s.tutor_id,
            st.registered
        FROM
            students s
            INNER JOIN student_test_dates st ON st.student_id = s.id
        WHERE
            st.test_date_id = ?
        ORDER BY
            s.id
        "#,
    )
    .bind(test_date_id)
    .fetch_all(exec)
    .await?;

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    async fn seed_test_date(pool: &sqlx::SqlitePool, id: i64, date: &str, status: &str) {
        sqlx::query(
            "INSERT INTO test_dates
                (id, test_type, date, registration_deadline, late_registration_deadline, status)
             VALUES (?, 'sat', ?, '2026-08-01', '2026-08-15', ?)",
        )
        .bind(id)
        .bind(date)
        .bind(status)
        .execute(pool)
        .await
        .expect("seed test date");
    }

    #[tokio::test]
    async fn upcoming_excludes_past_dates() {
        let pool = test_util::pool().await;
        seed_test_date(&pool, 1, "2026-09-12", "confirmed").await;
        seed_test_date(&pool, 2, "2026-06-06", "past").await;

        let dates = upcoming(&pool).await.expect("query");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].id, 1);
        assert_eq!(dates[0].test_type, TestType::Sat);
        assert_eq!(
            dates[0].date,
            NaiveDate::from_ymd_opt(2026, 9, 12).expect("date")
        );
    }

    #[tokio::test]
    async fn mark_past_is_idempotent() {
        let pool = test_util::pool().await;
        seed_test_date(&pool, 1, "2026-09-12", "confirmed").await;

        assert_eq!(mark_past(&pool, 1).await.expect("update"), 1);
        assert!(upcoming(&pool).await.expect("query").is_empty());

        // Second sweep finds the same terminal state.
        mark_past(&pool, 1).await.expect("update");
        assert!(upcoming(&pool).await.expect("query").is_empty());
    }

    #[tokio::test]
    async fn tracking_carries_registered_flag() {
        let pool = test_util::pool().await;
        test_util::seed_tutor(&pool, 1, "Danny", true).await;
        test_util::seed_student(&pool, 1, "Jane", "active").await;
        test_util::seed_student(&pool, 2, "Ben", "active").await;
        seed_test_date(&pool, 1, "2026-09-12", "confirmed").await;

        sqlx::query(
            "INSERT INTO student_test_dates (student_id, test_date_id, registered)
             VALUES (1, 1, 1), (2, 1, 0)",
        )
        .execute(&pool)
        .await
        .expect("seed tracking");

        let tracking = tracking(&pool, 1).await.expect("query");
        assert_eq!(tracking.len(), 2);
        assert!(tracking[0].registered);
        assert_eq!(tracking[0].student.first_name, "Jane");
        assert!(!tracking[1].registered);
    }
}
