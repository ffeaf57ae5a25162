//! DTOs for articles_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct ArticleCreate {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: String,
    /// JSON array text
    pub tags: String,
    pub author: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<OffsetDateTime>,
    /// Stamped into both `created_at` and `updated_at`.
    pub created_at: OffsetDateTime,
}

/// Column updates. `None` = unchanged; for nullable columns `Some(None)` clears.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub content: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub author: Option<Option<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub published_at: Option<Option<OffsetDateTime>>,
    pub updated_at: OffsetDateTime,
}

/// Listing filter at the column level.
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub category: Option<String>,
    /// Exact tag; matched against the JSON text
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub published_only: bool,
}
