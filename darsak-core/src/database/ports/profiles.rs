use async_trait::async_trait;
use darsak_model::{Profile, UserId};

use crate::error::Result;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>>;
}
