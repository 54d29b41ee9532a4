use async_trait::async_trait;
use darsak_model::{ContentId, ContentItem};

use crate::error::Result;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load a lesson with `published` resolved from its parent subject.
    async fn find_content(
        &self,
        content_id: ContentId,
    ) -> Result<Option<ContentItem>>;
}
