use sqlx::SqlitePool;

use crate::models::{Student, StudentFields};

pub async fn ensure_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            lastName TEXT,
            address TEXT,
            telephone TEXT
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}

pub async fn insert_student(db: &SqlitePool, fields: &StudentFields) -> Result<u64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let affected = sqlx::query(
        "INSERT INTO students (name, lastName, address, telephone) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&fields.name)
    .bind(&fields.last_name)
    .bind(&fields.address)
    .bind(&fields.telephone)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(affected)
}

pub async fn fetch_students(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, name, lastName, address, telephone FROM students")
        .fetch_all(db)
        .await
}

pub async fn find_student_by_id(db: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, name, lastName, address, telephone FROM students WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn update_student(
    db: &SqlitePool,
    id: i64,
    fields: &StudentFields,
) -> Result<u64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let affected = sqlx::query(
        r#"
        UPDATE students
        SET name = ?1,
            lastName = ?2,
            address = ?3,
            telephone = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.last_name)
    .bind(&fields.address)
    .bind(&fields.telephone)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(affected)
}

pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let affected = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(affected)
}
