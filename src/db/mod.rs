pub mod repository;

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::error::AppError;
use crate::models::{Student, StudentFields};

/// Opens the embedded database, creating the file when it does not exist yet.
///
/// In-memory databases live and die with their connection, so they get a
/// single connection that is never recycled.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    debug!("opened database {}", database_url);
    Ok(pool)
}

/// Storage gateway over the `students` table.
///
/// Mutations report the affected-row count; `0` means nothing was written.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), AppError>;
    async fn insert(&self, fields: &StudentFields) -> Result<u64, AppError>;
    async fn select_all(&self) -> Result<Vec<Student>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError>;
    async fn update(&self, id: i64, fields: &StudentFields) -> Result<u64, AppError>;
    async fn delete(&self, id: i64) -> Result<u64, AppError>;
}

#[derive(Clone)]
pub struct SqliteStudentStore {
    db: SqlitePool,
}

impl SqliteStudentStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        repository::ensure_schema(&self.db).await?;
        Ok(())
    }

    async fn insert(&self, fields: &StudentFields) -> Result<u64, AppError> {
        Ok(repository::insert_student(&self.db, fields).await?)
    }

    async fn select_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(repository::fetch_students(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        Ok(repository::find_student_by_id(&self.db, id).await?)
    }

    async fn update(&self, id: i64, fields: &StudentFields) -> Result<u64, AppError> {
        Ok(repository::update_student(&self.db, id, fields).await?)
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        Ok(repository::delete_student(&self.db, id).await?)
    }
}
