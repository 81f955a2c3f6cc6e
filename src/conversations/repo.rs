use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_text: String,
    pub summary_text: String,
    pub created_at: OffsetDateTime,
}

impl Conversation {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        original_text: &str,
        summary_text: &str,
    ) -> anyhow::Result<Conversation> {
        let row = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (user_id, original_text, summary_text)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, original_text, summary_text, created_at
            "#,
        )
        .bind(user_id)
        .bind(original_text)
        .bind(summary_text)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Conversation>> {
        let rows = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_id, original_text, summary_text, created_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Deletes only when the row belongs to the caller; returns whether
    /// a row was removed.
    pub async fn delete_owned(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
