use async_trait::async_trait;
use darsak_model::{PlanId, Profile, Role, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::profiles::ProfileRepository;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    role: String,
    is_subscribed: bool,
    plan_id: Option<String>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = darsak_model::ModelError;

    fn try_from(row: ProfileRow) -> std::result::Result<Self, Self::Error> {
        Ok(Profile {
            id: UserId(row.id),
            role: row.role.parse::<Role>()?,
            is_subscribed: row.is_subscribed,
            plan_id: row.plan_id.filter(|p| !p.is_empty()).map(PlanId::from),
        })
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, role, is_subscribed, plan_id
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id.to_uuid())
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Profile::try_from).transpose()?)
    }
}
