use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewPost, Post, PostChanges, PostFilter};
use crate::error::RepoError;

/// Generic repository trait defining the lookups every store supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a validated post. The store assigns the id; both timestamps are `at`.
    async fn insert(&self, post: NewPost, at: DateTime<Utc>) -> Result<Post, RepoError>;

    /// Apply `changes` to the post with `id` as one atomic read-modify-write.
    /// Returns `None` when no such post exists.
    async fn update(
        &self,
        id: i64,
        changes: PostChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// All posts matching `filter`, ordered by id ascending.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;
}
