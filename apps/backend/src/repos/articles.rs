//! Blog article repository.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::articles_sea as articles_adapter;
use crate::domain::article::{
    published_at_after, tags_from_json, tags_to_json, ArticleFilter, ArticlePatch, NewArticle,
};
use crate::errors::domain::DomainError;

pub const RELATED_LIMIT: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub view_count: i64,
    pub published_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

fn to_articles(rows: Vec<crate::entities::articles::Model>) -> Result<Vec<Article>, DomainError> {
    rows.into_iter().map(Article::try_from).collect()
}

/// `article` must already be validated (slug filled in).
pub async fn create_article<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article: NewArticle,
    now: OffsetDateTime,
) -> Result<Article, DomainError> {
    let dto = articles_adapter::ArticleCreate {
        slug: article.slug.unwrap_or_default(),
        title: article.title,
        excerpt: article.excerpt,
        content: article.content,
        cover_image: article.cover_image,
        category: article.category,
        tags: tags_to_json(&article.tags),
        author: article.author,
        published: article.published,
        featured: article.featured,
        published_at: published_at_after(None, article.published, now),
        created_at: now,
    };
    let model = articles_adapter::create_article(conn, dto).await?;
    Article::try_from(model)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Article>, DomainError> {
    articles_adapter::find_by_id(conn, id)
        .await?
        .map(Article::try_from)
        .transpose()
}

/// Drafts are not visible by slug.
pub async fn find_published_by_slug<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<Article>, DomainError> {
    articles_adapter::find_by_slug(conn, slug)
        .await?
        .filter(|m| m.published)
        .map(Article::try_from)
        .transpose()
}

pub async fn increment_view_count<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    articles_adapter::increment_view_count(conn, id).await?;
    Ok(())
}

pub async fn list_articles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &ArticleFilter,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Article>, u64), DomainError> {
    let query = articles_adapter::ArticleQuery {
        category: filter.category.clone(),
        tag: filter.tag.clone(),
        featured: filter.featured,
        search: filter.search.clone(),
        published_only: !filter.include_drafts,
    };
    let (rows, total) = articles_adapter::list_articles(conn, &query, offset, limit).await?;
    Ok((to_articles(rows)?, total))
}

pub async fn published_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<CategoryCount>, DomainError> {
    let rows = articles_adapter::published_categories(conn).await?;
    Ok(rows
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect())
}

pub async fn related<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article: &Article,
) -> Result<Vec<Article>, DomainError> {
    let rows =
        articles_adapter::related(conn, article.id, &article.category, RELATED_LIMIT).await?;
    to_articles(rows)
}

/// `Ok(None)` when the article does not exist. `patch` must be validated.
pub async fn update_article<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: ArticlePatch,
    now: OffsetDateTime,
) -> Result<Option<Article>, DomainError> {
    let Some(existing) = articles_adapter::find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let published_at = patch.published.and_then(|published| {
        let next = published_at_after(existing.published_at, published, now);
        (next != existing.published_at).then_some(next)
    });
    let dto = articles_adapter::ArticleUpdate {
        title: patch.title,
        slug: patch.slug,
        excerpt: patch.excerpt,
        content: patch.content,
        cover_image: patch.cover_image,
        category: patch.category,
        tags: patch.tags.as_deref().map(tags_to_json),
        author: patch.author,
        published: patch.published,
        featured: patch.featured,
        published_at,
        updated_at: now,
    };
    let model = articles_adapter::update_article(conn, existing, dto).await?;
    Article::try_from(model).map(Some)
}

pub async fn delete_article<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    Ok(articles_adapter::delete_article(conn, id).await? > 0)
}

impl TryFrom<crate::entities::articles::Model> for Article {
    type Error = DomainError;

    fn try_from(model: crate::entities::articles::Model) -> Result<Self, Self::Error> {
        let tags = tags_from_json(&model.tags, model.id)?;
        Ok(Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            excerpt: model.excerpt,
            content: model.content,
            cover_image: model.cover_image,
            category: model.category,
            tags,
            author: model.author,
            published: model.published,
            featured: model.featured,
            view_count: model.view_count,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
