//! PostService: field validation and timestamps in front of a [`PostRepository`].

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges, PostFilter, timestamp};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

const ENTITY: &str = "post";

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id,
    }
}

/// The post resource model. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let post = post.validate()?;
        let created = self.repo.insert(post, timestamp()).await?;
        tracing::info!(post_id = created.id, "Post created");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Posts matching `filter`, oldest id first.
    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list(filter).await?)
    }

    /// Validate `changes` and apply them. Nothing is written when validation fails.
    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, DomainError> {
        let changes = changes.validate()?;
        let updated = self
            .repo
            .update(id, changes, timestamp())
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(post_id = id, "Post updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = id, "Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(not_found(id)),
            Err(e) => Err(e.into()),
        }
    }
}
