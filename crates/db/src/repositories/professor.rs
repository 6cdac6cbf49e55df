use crate::models::DbProfessor;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use coursedesk_core::models::professor::Professor;

pub async fn create_professor(pool: &Pool<Postgres>, professor: &Professor) -> Result<DbProfessor> {
    tracing::debug!("Creating professor: id={}, name={}", professor.id, professor.name);

    let row = sqlx::query_as::<_, DbProfessor>(
        r#"
        INSERT INTO professors (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(professor.id)
    .bind(&professor.name)
    .bind(professor.created_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_professors(pool: &Pool<Postgres>) -> Result<Vec<DbProfessor>> {
    let rows = sqlx::query_as::<_, DbProfessor>(
        r#"
        SELECT id, name, created_at
        FROM professors
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_professor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfessor>> {
    let row = sqlx::query_as::<_, DbProfessor>(
        r#"
        SELECT id, name, created_at
        FROM professors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_professor_by_name(pool: &Pool<Postgres>, name: &str) -> Result<Option<DbProfessor>> {
    let row = sqlx::query_as::<_, DbProfessor>(
        r#"
        SELECT id, name, created_at
        FROM professors
        WHERE LOWER(name) = LOWER($1)
        "#,
    )
    .bind(name.trim())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_professor(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfessor>> {
    let row = sqlx::query_as::<_, DbProfessor>(
        r#"
        DELETE FROM professors
        WHERE id = $1
        RETURNING id, name, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
