mod error;
pub use error::{Error, Result};

pub mod schema;
pub mod student;
pub mod test_date;
pub mod tutor;

pub use student::Student;
pub use test_date::TestDate;
pub use tutor::Tutor;

use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::str::FromStr;

/// Open the database, creating the file on a fresh install so `migrate`
/// can bootstrap it.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    Ok(pool)
}


#[cfg(test)]
pub(crate) mod test_util {
    use sqlx::SqlitePool;

    pub async fn pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::schema::migrate(&pool).await.expect("schema");
        pool
    }

    pub async fn seed_tutor(pool: &SqlitePool, id: i64, first_name: &str, is_primary: bool) {
        sqlx::query(
            "INSERT INTO tutors (id, first_name, email, timezone, status, is_primary)
             VALUES (?, ?, ?, 0, 'active', ?)",
        )
        .bind(id)
        .bind(first_name)
        .bind(format!("{}@example.com", first_name.to_lowercase()))
        .bind(is_primary)
        .execute(pool)
        .await
        .expect("seed tutor");
    }

    pub async fn seed_student(pool: &SqlitePool, id: i64, first_name: &str, status: &str) {
        sqlx::query(
            "INSERT INTO students (id, first_name, email, timezone, status, tutor_id)
             VALUES (?, ?, ?, 0, ?, 1)",
        )
        .bind(id)
        .bind(first_name)
        .bind(format!("{}@example.com", first_name.to_lowercase()))
        .bind(status)
        .execute(pool)
        .await
        .expect("seed student");
    }
}
