use crate::Result;
use sqlx::SqlitePool;

/// Table bootstrap for the reminder job's store. The admin web application
/// owns the canonical schema; this creates the same tables for fresh
/// installs and tests.
pub const MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS tutors (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT,
    email TEXT NOT NULL,
    timezone INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'active',
    is_primary INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT,
    email TEXT NOT NULL,
    parent_email TEXT,
    secondary_email TEXT,
    timezone INTEGER NOT NULL DEFAULT 0,
    location TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    tutor_id INTEGER NOT NULL REFERENCES tutors (id)
);

CREATE TABLE IF NOT EXISTS test_dates (
    id INTEGER PRIMARY KEY,
    test_type TEXT NOT NULL,
    date TEXT NOT NULL,
    registration_deadline TEXT NOT NULL,
    late_registration_deadline TEXT NOT NULL,
    score_release TEXT,
    status TEXT NOT NULL DEFAULT 'unconfirmed'
);

CREATE TABLE IF NOT EXISTS student_test_dates (
    student_id INTEGER NOT NULL REFERENCES students (id),
    test_date_id INTEGER NOT NULL REFERENCES test_dates (id),
    registered INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (student_id, test_date_id)
);
"#;

pub async fn migrate(pool: &SqlitePool) -> Result {
    sqlx::raw_sql(MIGRATION).execute(pool).await?;
    Ok(())
}
