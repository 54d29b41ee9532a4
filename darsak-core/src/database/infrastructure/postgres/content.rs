use async_trait::async_trait;
use darsak_model::{ContentId, ContentItem, PlanId, SubjectId, UnitId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::content::ContentRepository;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LessonRow {
    id: Uuid,
    unit_id: Uuid,
    subject_id: Uuid,
    is_free: bool,
    required_plan_id: Option<String>,
    published: bool,
}

impl From<LessonRow> for ContentItem {
    fn from(row: LessonRow) -> Self {
        ContentItem {
            id: ContentId(row.id),
            unit_id: UnitId(row.unit_id),
            subject_id: SubjectId(row.subject_id),
            is_free: row.is_free,
            required_plan_id: row
                .required_plan_id
                .filter(|p| !p.is_empty())
                .map(PlanId::from),
            published: row.published,
        }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_content(
        &self,
        content_id: ContentId,
    ) -> Result<Option<ContentItem>> {
        let row = sqlx::query_as::<_, LessonRow>(
            r#"
            SELECT l.id, l.unit_id, u.subject_id, l.is_free,
                   l.required_plan_id, s.published
            FROM lessons l
            INNER JOIN units u ON u.id = l.unit_id
            INNER JOIN subjects s ON s.id = u.subject_id
            WHERE l.id = $1
            "#,
        )
        .bind(content_id.to_uuid())
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(ContentItem::from))
    }
}
