//! Blog article service.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::article::{ArticleFilter, ArticlePatch, NewArticle};
use crate::domain::paging::PageRequest;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::articles::{self, Article, CategoryCount};

fn article_not_found(detail: String) -> DomainError {
    DomainError::not_found(NotFoundKind::Article, detail)
}

pub struct ArticleService;

impl ArticleService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        articles::list_articles(conn, filter, page.offset(), page.per_page).await
    }

    pub async fn categories<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<CategoryCount>, DomainError> {
        articles::published_categories(conn).await
    }

    /// Drafts are reported as missing unless `include_drafts`.
    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        include_drafts: bool,
    ) -> Result<Article, DomainError> {
        articles::find_by_id(conn, id)
            .await?
            .filter(|a| a.published || include_drafts)
            .ok_or_else(|| article_not_found(format!("Không tìm thấy bài viết #{id}")))
    }

    /// Fetch a published article and count the view.
    pub async fn read_by_slug<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        slug: &str,
    ) -> Result<Article, DomainError> {
        let mut article = self.published_by_slug(conn, slug).await?;
        articles::increment_view_count(conn, article.id).await?;
        article.view_count += 1;
        Ok(article)
    }

    pub async fn related<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        slug: &str,
    ) -> Result<Vec<Article>, DomainError> {
        let article = self.published_by_slug(conn, slug).await?;
        articles::related(conn, &article).await
    }

    async fn published_by_slug<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        slug: &str,
    ) -> Result<Article, DomainError> {
        articles::find_published_by_slug(conn, slug)
            .await?
            .ok_or_else(|| article_not_found(format!("Không tìm thấy bài viết '{slug}'")))
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        article: NewArticle,
    ) -> Result<Article, DomainError> {
        let article = article.validate()?;
        let created = articles::create_article(conn, article, OffsetDateTime::now_utc()).await?;
        info!(article_id = created.id, slug = %created.slug, published = created.published, "article created");
        Ok(created)
    }

    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        patch: ArticlePatch,
    ) -> Result<Article, DomainError> {
        let patch = patch.validate()?;
        articles::update_article(conn, id, patch, OffsetDateTime::now_utc())
            .await?
            .ok_or_else(|| article_not_found(format!("Không tìm thấy bài viết #{id}")))
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        if !articles::delete_article(conn, id).await? {
            return Err(article_not_found(format!("Không tìm thấy bài viết #{id}")));
        }
        info!(article_id = id, "article deleted");
        Ok(())
    }
}

impl Default for ArticleService {
    fn default() -> Self {
        Self::new()
    }
}
