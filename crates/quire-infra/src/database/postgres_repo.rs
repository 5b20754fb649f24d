//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

use quire_core::domain::{NewPost, Post, PostChanges, PostFilter};
use quire_core::error::RepoError;
use quire_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE wildcards so the term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `col ILIKE %term%` over title, content and category.
fn search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(term));

    [
        post::Column::Title,
        post::Column::Content,
        post::Column::Category,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, col| {
        cond.add(Expr::col(col).ilike(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)))
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new: NewPost, at: DateTime<Utc>) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from_new(new, at)
            .insert(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Inserted post row");
        Ok(model.into())
    }

    async fn update(
        &self,
        id: i64,
        changes: PostChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(repo_error)?;

        // Row lock so concurrent updates of one post serialize here.
        let Some(model) = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(repo_error)?
        else {
            return Ok(None);
        };

        let mut current: Post = model.into();
        changes.apply(&mut current, at);

        let updated = post::ActiveModel::from(current)
            .update(&txn)
            .await
            .map_err(repo_error)?;
        txn.commit().await.map_err(repo_error)?;

        tracing::debug!(post_id = id, "Updated post row");
        Ok(Some(updated.into()))
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find().order_by_asc(post::Column::Id);
        if let Some(term) = filter.term() {
            tracing::debug!(term = %term, "Searching posts");
            query = query.filter(search_condition(term));
        }

        let rows = query.all(&self.db).await.map_err(repo_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
