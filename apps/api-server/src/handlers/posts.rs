//! Post handlers: one per (verb, path).

use actix_web::{HttpResponse, web};

use quire_core::domain::{NewPost, Post, PostChanges, PostFilter};
use quire_shared::dto::{CreatePostRequest, PostResponse, SearchQuery, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// `Some(None)` means the client sent an explicit null.
fn not_null(field: &str, value: Option<Option<String>>) -> AppResult<Option<String>> {
    match value {
        Some(None) => Err(AppError::BadRequest(format!("{} must not be null", field))),
        other => Ok(other.flatten()),
    }
}

/// GET /posts?term=...
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter {
        term: query.into_inner().term,
    };
    let posts = state.posts.list(&filter).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewPost {
        title: req.title.unwrap_or_default(),
        content: req.content.unwrap_or_default(),
        category: req.category,
        tags: req.tags.unwrap_or_default(),
    };

    let post = state.posts.create(new).await?;
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: not_null("title", req.title)?,
        content: not_null("content", req.content)?,
        category: req.category,
        tags: req.tags,
    };

    let post = state.posts.update(path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
