use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::error::DomainError;

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 100;
/// Maximum category length, in characters.
pub const CATEGORY_MAX_LEN: usize = 100;
/// Maximum length of a single tag, in characters.
pub const TAG_MAX_LEN: usize = 50;

/// Current time truncated to the microsecond precision the store keeps.
pub fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Post entity - represents one blog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a validated [`NewPost`] under a store-assigned id.
    pub fn from_new(id: i64, new: NewPost, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            category: new.category,
            tags: new.tags,
            created_at: at,
            updated_at: at,
        }
    }

    /// Case-insensitive substring match over title, content and category.
    pub fn matches(&self, filter: &PostFilter) -> bool {
        let Some(term) = filter.term() else {
            return true;
        };
        let needle = term.to_lowercase();

        [Some(&self.title), Some(&self.content), self.category.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Fields supplied when creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check field rules and return the normalized payload.
    pub fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: required_text("title", self.title, Some(TITLE_MAX_LEN))?,
            content: required_text("content", self.content, None)?,
            category: normalize_category(self.category)?,
            tags: normalize_tags(self.tags)?,
        })
    }
}

/// A partial update. `None` leaves the stored value untouched;
/// `category: Some(None)` clears the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    /// Check the supplied fields and return the normalized change set.
    pub fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: self
                .title
                .map(|t| required_text("title", t, Some(TITLE_MAX_LEN)))
                .transpose()?,
            content: self
                .content
                .map(|c| required_text("content", c, None))
                .transpose()?,
            category: self.category.map(normalize_category).transpose()?,
            tags: self.tags.map(normalize_tags).transpose()?,
        })
    }

    /// Write the changes into `post` and move `updated_at` forward.
    pub fn apply(self, post: &mut Post, at: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        // updated_at must strictly advance, even when the clock does not.
        post.updated_at = if at > post.updated_at {
            at
        } else {
            post.updated_at + Duration::microseconds(1)
        };
    }
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub term: Option<String>,
}

impl PostFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
        }
    }

    /// The search term, or `None` when absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref().filter(|t| !t.trim().is_empty())
    }
}

fn required_text(field: &str, value: String, max: Option<usize>) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    check_length(field, &value, max)?;
    Ok(value)
}

fn check_length(field: &str, value: &str, max: Option<usize>) -> Result<(), DomainError> {
    match max {
        Some(max) if value.chars().count() > max => Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

fn normalize_category(category: Option<String>) -> Result<Option<String>, DomainError> {
    match category {
        Some(c) if !c.trim().is_empty() => {
            check_length("category", &c, Some(CATEGORY_MAX_LEN))?;
            Ok(Some(c))
        }
        _ => Ok(None),
    }
}

fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, DomainError> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(DomainError::Validation(
                "tags must not contain empty values".to_string(),
            ));
        }
        check_length("tag", tag, Some(TAG_MAX_LEN))?;
        if !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    Ok(out)
}
