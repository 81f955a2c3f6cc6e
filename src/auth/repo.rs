use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub favorite_food: Option<String>,
    pub spice_level: Option<String>,
    pub birthdate: Option<Date>,
    pub grade: String,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, favorite_food, spice_level, birthdate, grade, created_at";

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(user)
    }

    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        favorite_food: Option<&str>,
        spice_level: Option<&str>,
        birthdate: Option<Date>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, favorite_food, spice_level, birthdate)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(favorite_food)
        .bind(spice_level)
        .bind(birthdate)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Partial update: only the provided preference fields change.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        favorite_food: Option<&str>,
        spice_level: Option<&str>,
        birthdate: Option<Date>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET favorite_food = COALESCE($2, favorite_food),
                spice_level   = COALESCE($3, spice_level),
                birthdate     = COALESCE($4, birthdate)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(favorite_food)
        .bind(spice_level)
        .bind(birthdate)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }
}
