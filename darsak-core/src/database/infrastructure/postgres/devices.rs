use async_trait::async_trait;
use chrono::{DateTime, Utc};
use darsak_model::{DeviceId, DeviceRegistration, UserId};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::devices::{DeviceRegistrationRepository, SlotClaim};
use crate::error::{CoreError, Result};

/// SQLSTATE raised when `user_devices.user_id` has no matching profile.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Device rows keyed by `(user_id, device_id)`.
///
/// `claim_slot` serialises concurrent claims for the same user with a
/// transaction-scoped advisory lock, so the count it reads is the count it
/// inserts against.
#[derive(Clone, Debug)]
pub struct PostgresDeviceRegistrationRepository {
    pool: PgPool,
}

impl PostgresDeviceRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    user_id: Uuid,
    device_id: String,
    device_name: String,
    last_active: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DeviceRow> for DeviceRegistration {
    type Error = darsak_model::ModelError;

    fn try_from(row: DeviceRow) -> std::result::Result<Self, Self::Error> {
        Ok(DeviceRegistration {
            user_id: UserId(row.user_id),
            device_id: DeviceId::parse(row.device_id)?,
            device_name: row.device_name,
            last_active: row.last_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl DeviceRegistrationRepository for PostgresDeviceRegistrationRepository {
    async fn claim_slot(
        &self,
        registration: &DeviceRegistration,
        max_devices: usize,
    ) -> Result<SlotClaim> {
        let user_id = registration.user_id.to_uuid();
        let mut tx = self.pool().begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        let refreshed = sqlx::query(
            r#"
            UPDATE user_devices
            SET last_active = $3
            WHERE user_id = $1 AND device_id = $2
            "#,
        )
        .bind(user_id)
        .bind(registration.device_id.as_str())
        .bind(registration.last_active)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if refreshed > 0 {
            tx.commit().await?;
            return Ok(SlotClaim::Refreshed);
        }

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_devices WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        let active = usize::try_from(active).map_err(|_| {
            CoreError::Internal(format!("negative device count {active}"))
        })?;

        if active >= max_devices {
            tx.rollback().await?;
            debug!(user_id = %user_id, active, "device slot refused");
            return Ok(SlotClaim::LimitReached { active });
        }

        sqlx::query(
            r#"
            INSERT INTO user_devices
                (user_id, device_id, device_name, last_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(registration.device_id.as_str())
        .bind(&registration.device_name)
        .bind(registration.last_active)
        .bind(registration.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            let missing_profile = err
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == FOREIGN_KEY_VIOLATION);
            if missing_profile {
                CoreError::NotFound(format!("profile {user_id}"))
            } else {
                CoreError::from(err)
            }
        })?;

        tx.commit().await?;
        Ok(SlotClaim::Inserted)
    }

    async fn release(
        &self,
        user_id: UserId,
        device_id: &DeviceId,
    ) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM user_devices WHERE user_id = $1 AND device_id = $2",
        )
        .bind(user_id.to_uuid())
        .bind(device_id.as_str())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DeviceRegistration>> {
        let rows = sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT user_id, device_id, device_name, last_active, created_at
            FROM user_devices
            WHERE user_id = $1
            ORDER BY last_active DESC
            "#,
        )
        .bind(user_id.to_uuid())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                DeviceRegistration::try_from(row).map_err(CoreError::from)
            })
            .collect()
    }
}
