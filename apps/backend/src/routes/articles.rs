use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use crate::db::txn::with_txn;
use crate::domain::article::{ArticleFilter, ArticlePatch, NewArticle};
use crate::domain::paging::PageRequest;
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, MaybeAdmin, ValidatedJson};
use crate::http::envelope::{self, PageMeta};
use crate::http::timestamp;
use crate::repos::articles::{Article, CategoryCount};
use crate::services::articles::ArticleService;
use crate::state::app_state::AppState;
use super::resource;

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
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
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            slug: a.slug,
            excerpt: a.excerpt,
            content: a.content,
            cover_image: a.cover_image,
            category: a.category,
            tags: a.tags,
            author: a.author,
            published: a.published,
            featured: a.featured,
            view_count: a.view_count,
            published_at: a.published_at.map(timestamp),
            created_at: timestamp(a.created_at),
            updated_at: timestamp(a.updated_at),
        }
    }
}

/// List item: everything but the body.
#[derive(Debug, Serialize)]
pub struct ArticleSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub view_count: i64,
    pub published_at: Option<String>,
    pub created_at: String,
}

impl From<Article> for ArticleSummary {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            slug: a.slug,
            excerpt: a.excerpt,
            cover_image: a.cover_image,
            category: a.category,
            tags: a.tags,
            author: a.author,
            published: a.published,
            featured: a.featured,
            view_count: a.view_count,
            published_at: a.published_at.map(timestamp),
            created_at: timestamp(a.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: String,
    pub count: i64,
}

impl From<CategoryCount> for CategoryResponse {
    fn from(c: CategoryCount) -> Self {
        Self {
            category: c.category,
            count: c.count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub include_drafts: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ListArticlesQuery {
    /// Drafts are only listed for an admin who asks for them.
    fn filter(self, is_admin: bool) -> ArticleFilter {
        ArticleFilter {
            category: non_blank(self.category),
            tag: non_blank(self.tag),
            featured: self.featured,
            search: non_blank(self.search),
            include_drafts: is_admin && self.include_drafts.unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, with = "double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, with = "double_option")]
    pub cover_image: Option<Option<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, with = "double_option")]
    pub author: Option<Option<String>>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl From<UpdateArticleRequest> for ArticlePatch {
    fn from(r: UpdateArticleRequest) -> Self {
        Self {
            title: r.title,
            slug: r.slug,
            excerpt: r.excerpt,
            content: r.content,
            cover_image: r.cover_image,
            category: r.category,
            tags: r.tags,
            author: r.author,
            published: r.published,
            featured: r.featured,
        }
    }
}

async fn list_articles(
    req: HttpRequest,
    caller: MaybeAdmin,
    app_state: web::Data<AppState>,
    query: web::Query<ListArticlesQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageRequest::from_query(query.page, query.per_page)?;
    let filter = query.filter(caller.is_admin());

    let (articles, total) = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .list(txn, &filter, page)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let data = articles.into_iter().map(ArticleSummary::from).collect();
    Ok(envelope::paged(data, PageMeta::new(page, total)))
}

async fn list_categories(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let categories = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .categories(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let data: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(envelope::ok(data))
}

async fn get_article(
    req: HttpRequest,
    caller: MaybeAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let include_drafts = caller.is_admin();
    let article = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .get(txn, id, include_drafts)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(ArticleResponse::from(article)))
}

async fn get_article_by_slug(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let article = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .read_by_slug(txn, &slug)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(ArticleResponse::from(article)))
}

async fn related_articles(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let related = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .related(txn, &slug)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let data: Vec<ArticleSummary> = related.into_iter().map(ArticleSummary::from).collect();
    Ok(envelope::ok(data))
}

async fn create_article(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewArticle>,
) -> Result<HttpResponse, AppError> {
    let article = body.into_inner();
    let created = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .create(txn, article)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::created(ArticleResponse::from(created)))
}

async fn update_article(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateArticleRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = ArticlePatch::from(body.into_inner());
    let updated = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .update(txn, id, patch)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(ArticleResponse::from(updated)))
}

async fn delete_article(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ArticleService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::deleted("Đã xóa bài viết"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        resource("")
            .route(web::get().to(list_articles))
            .route(web::post().to(create_article)),
    )
    // Literal segments before `/{id}`.
    .service(resource("/categories").route(web::get().to(list_categories)))
    .service(resource("/slug/{slug}").route(web::get().to(get_article_by_slug)))
    .service(resource("/slug/{slug}/related").route(web::get().to(related_articles)))
    .service(
        resource("/{id}")
            .route(web::get().to(get_article))
            .route(web::patch().to(update_article))
            .route(web::delete().to(delete_article)),
    );
}
