use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use darsak_model::{ContentId, OwnershipGrant, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::ownership::OwnershipRepository;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct PostgresOwnershipRepository {
    pool: PgPool,
}

impl PostgresOwnershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GrantRow {
    user_id: Uuid,
    content_id: Uuid,
    granted_at: DateTime<Utc>,
}

#[async_trait]
impl OwnershipRepository for PostgresOwnershipRepository {
    async fn owned_content_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<ContentId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT content_id FROM content_ownership WHERE user_id = $1",
        )
        .bind(user_id.to_uuid())
        .fetch_all(self.pool())
        .await?;

        Ok(ids.into_iter().map(ContentId).collect())
    }

    async fn list_grants(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OwnershipGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT user_id, content_id, granted_at
            FROM content_ownership
            WHERE user_id = $1
            ORDER BY granted_at DESC
            "#,
        )
        .bind(user_id.to_uuid())
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OwnershipGrant {
                user_id: UserId(row.user_id),
                content_id: ContentId(row.content_id),
                granted_at: row.granted_at,
            })
            .collect())
    }

    async fn grant(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO content_ownership (user_id, content_id, granted_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, content_id) DO NOTHING
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(content_id.to_uuid())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM content_ownership \
             WHERE user_id = $1 AND content_id = $2",
        )
        .bind(user_id.to_uuid())
        .bind(content_id.to_uuid())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
