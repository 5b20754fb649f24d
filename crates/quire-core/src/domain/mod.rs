//! Domain entities - the core business objects.

mod post;

pub use post::{
    CATEGORY_MAX_LEN, NewPost, Post, PostChanges, PostFilter, TAG_MAX_LEN, TITLE_MAX_LEN,
    timestamp,
};
