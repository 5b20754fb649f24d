//! In-memory post store - used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quire_core::domain::{NewPost, Post, PostChanges, PostFilter};
use quire_core::error::RepoError;
use quire_core::ports::{BaseRepository, PostRepository};

struct Store {
    next_id: i64,
    posts: BTreeMap<i64, Post>,
}

/// In-memory post repository over an ordered map with an async RwLock.
///
/// Ids start at 1 and are never reused. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                posts: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, new: NewPost, at: DateTime<Utc>) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let post = Post::from_new(id, new, at);
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: i64,
        changes: PostChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        // One write lock covers the whole read-modify-write.
        let mut store = self.store.write().await;
        Ok(store.posts.get_mut(&id).map(|post| {
            changes.apply(post, at);
            post.clone()
        }))
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .posts
            .values()
            .filter(|post| post.matches(filter))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::domain::timestamp;

    #[tokio::test]
    async fn test_insert_assigns_ascending_ids() {
        let repo = InMemoryPostRepository::new();
        let a = repo.insert(NewPost::new("a", "1"), timestamp()).await.unwrap();
        let b = repo.insert(NewPost::new("b", "2"), timestamp()).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let repo = InMemoryPostRepository::new();
        repo.insert(NewPost::new("a", "1"), timestamp()).await.unwrap();
        repo.delete(1).await.unwrap();

        assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
        assert_eq!(repo.find_by_id(1).await.unwrap(), None);

        let next = repo.insert(NewPost::new("b", "2"), timestamp()).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryPostRepository::new();
        let result = repo
            .update(9, PostChanges::default(), timestamp())
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_list_filters_in_id_order() {
        let repo = InMemoryPostRepository::new();
        repo.insert(NewPost::new("Rust", "x"), timestamp()).await.unwrap();
        repo.insert(NewPost::new("Go", "x"), timestamp()).await.unwrap();
        repo.insert(NewPost::new("Zig", "trusty").with_category("misc"), timestamp())
            .await
            .unwrap();

        let all = repo.list(&PostFilter::default()).await.unwrap();
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let hits = repo.list(&PostFilter::search("RUST")).await.unwrap();
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
