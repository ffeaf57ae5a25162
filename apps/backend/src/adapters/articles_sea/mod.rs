//! SeaORM adapter for blog articles.

use sea_orm::sea_query::{Expr, LikeExpr, NullOrdering};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    NotSet, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::{contains_ci, like_escape};
use crate::entities::articles;

pub mod dto;

pub use dto::{ArticleCreate, ArticleQuery, ArticleUpdate};

fn apply_query(mut select: Select<articles::Entity>, q: &ArticleQuery) -> Select<articles::Entity> {
    if q.published_only {
        select = select.filter(articles::Column::Published.eq(true));
    }
    if let Some(category) = &q.category {
        select = select.filter(articles::Column::Category.eq(category.as_str()));
    }
    if let Some(featured) = q.featured {
        select = select.filter(articles::Column::Featured.eq(featured));
    }
    if let Some(tag) = &q.tag {
        // Tags are stored as a JSON array, so look for the quoted element.
        let quoted = serde_json::to_string(tag).unwrap_or_default();
        let pattern = format!("%{}%", like_escape(&quoted));
        select = select.filter(
            Expr::col(articles::Column::Tags).like(LikeExpr::new(pattern).escape('\\')),
        );
    }
    if let Some(search) = &q.search {
        select = select.filter(
            Condition::any()
                .add(contains_ci(articles::Column::Title, search))
                .add(contains_ci(articles::Column::Excerpt, search)),
        );
    }
    select
}

fn newest_first(select: Select<articles::Entity>) -> Select<articles::Entity> {
    select
        .order_by_with_nulls(articles::Column::PublishedAt, Order::Desc, NullOrdering::Last)
        .order_by_desc(articles::Column::CreatedAt)
        .order_by_desc(articles::Column::Id)
}

pub async fn create_article<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ArticleCreate,
) -> Result<articles::Model, sea_orm::DbErr> {
    articles::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        slug: Set(dto.slug),
        excerpt: Set(dto.excerpt),
        content: Set(dto.content),
        cover_image: Set(dto.cover_image),
        category: Set(dto.category),
        tags: Set(dto.tags),
        author: Set(dto.author),
        published: Set(dto.published),
        featured: Set(dto.featured),
        view_count: Set(0),
        published_at: Set(dto.published_at),
        created_at: Set(dto.created_at),
        updated_at: Set(dto.created_at),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<articles::Model>, sea_orm::DbErr> {
    articles::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_slug<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<articles::Model>, sea_orm::DbErr> {
    articles::Entity::find()
        .filter(articles::Column::Slug.eq(slug))
        .one(conn)
        .await
}

pub async fn list_articles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &ArticleQuery,
    offset: u64,
    limit: u64,
) -> Result<(Vec<articles::Model>, u64), sea_orm::DbErr> {
    let select = apply_query(articles::Entity::find(), query);
    let total = select.clone().count(conn).await?;
    let rows = newest_first(select)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await?;
    Ok((rows, total))
}

/// `(category, published article count)`, alphabetical.
pub async fn published_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, i64)>, sea_orm::DbErr> {
    articles::Entity::find()
        .select_only()
        .column(articles::Column::Category)
        .column_as(articles::Column::Id.count(), "count")
        .filter(articles::Column::Published.eq(true))
        .group_by(articles::Column::Category)
        .order_by_asc(articles::Column::Category)
        .into_tuple::<(String, i64)>()
        .all(conn)
        .await
}

/// Other published articles in `category`, newest first.
pub async fn related<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    exclude_id: i64,
    category: &str,
    limit: u64,
) -> Result<Vec<articles::Model>, sea_orm::DbErr> {
    let select = articles::Entity::find()
        .filter(articles::Column::Published.eq(true))
        .filter(articles::Column::Category.eq(category))
        .filter(articles::Column::Id.ne(exclude_id));
    newest_first(select).limit(limit).all(conn).await
}

pub async fn increment_view_count<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = articles::Entity::update_many()
        .col_expr(
            articles::Column::ViewCount,
            Expr::col(articles::Column::ViewCount).add(1),
        )
        .filter(articles::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Apply `dto` to `existing` and persist.
pub async fn update_article<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: articles::Model,
    dto: ArticleUpdate,
) -> Result<articles::Model, sea_orm::DbErr> {
    let mut active = existing.into_active_model();
    if let Some(v) = dto.title {
        active.title = Set(v);
    }
    if let Some(v) = dto.slug {
        active.slug = Set(v);
    }
    if let Some(v) = dto.excerpt {
        active.excerpt = Set(v);
    }
    if let Some(v) = dto.content {
        active.content = Set(v);
    }
    if let Some(v) = dto.cover_image {
        active.cover_image = Set(v);
    }
    if let Some(v) = dto.category {
        active.category = Set(v);
    }
    if let Some(v) = dto.tags {
        active.tags = Set(v);
    }
    if let Some(v) = dto.author {
        active.author = Set(v);
    }
    if let Some(v) = dto.published {
        active.published = Set(v);
    }
    if let Some(v) = dto.featured {
        active.featured = Set(v);
    }
    if let Some(v) = dto.published_at {
        active.published_at = Set(v);
    }
    active.updated_at = Set(dto.updated_at);

    active.update(conn).await
}

pub async fn delete_article<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = articles::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
