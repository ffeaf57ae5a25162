//! Blog articles: input validation, tag handling and publish rules.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::domain::contact::clean_optional;
use crate::domain::slug::{is_valid_slug, slugify};
use crate::domain::validation::FieldErrors;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const TITLE_MAX: usize = 255;
pub const EXCERPT_MAX: usize = 500;
pub const CATEGORY_MAX: usize = 100;
pub const AUTHOR_MAX: usize = 100;
pub const COVER_IMAGE_MAX: usize = 500;
pub const TAG_MAX: usize = 50;
pub const MAX_TAGS: usize = 20;

/// Trim tags, drop empty ones and duplicates (case-insensitive, first spelling kept).
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            continue;
        }
        let key = tag.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(tag.to_string());
    }
    out
}

pub fn tags_to_json(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

pub fn tags_from_json(raw: &str, article_id: i64) -> Result<Vec<String>, DomainError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("invalid tags JSON stored for article_id={article_id}: {e}"),
        )
    })
}

/// `published_at` is stamped the first time an article is published and kept afterwards.
pub fn published_at_after(
    current: Option<OffsetDateTime>,
    published: bool,
    now: OffsetDateTime,
) -> Option<OffsetDateTime> {
    match current {
        Some(ts) => Some(ts),
        None if published => Some(now),
        None => None,
    }
}

fn check_cover_image(errs: &mut FieldErrors, url: &str) {
    errs.max_len("cover_image", url, COVER_IMAGE_MAX);
    if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')) {
        errs.push("cover_image", "Đường dẫn ảnh bìa không hợp lệ");
    }
}

fn check_tags(errs: &mut FieldErrors, tags: &[String]) {
    if tags.len() > MAX_TAGS {
        errs.push("tags", format!("Tối đa {MAX_TAGS} thẻ"));
    }
    if tags.iter().any(|t| t.chars().count() > TAG_MAX) {
        errs.push("tags", format!("Mỗi thẻ không được vượt quá {TAG_MAX} ký tự"));
    }
}

fn check_slug(errs: &mut FieldErrors, slug: &str) {
    if !is_valid_slug(slug) {
        errs.push(
            "slug",
            "Đường dẫn chỉ gồm chữ thường không dấu, số và dấu gạch ngang",
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
}

impl NewArticle {
    /// Validate and normalise. The returned article always carries a slug:
    /// the supplied one, or one derived from the title.
    pub fn validate(self) -> Result<Self, DomainError> {
        let title = self.title.trim().to_string();
        let mut article = Self {
            slug: clean_optional(self.slug),
            excerpt: clean_optional(self.excerpt),
            content: self.content.trim().to_string(),
            cover_image: clean_optional(self.cover_image),
            category: self.category.trim().to_string(),
            tags: normalize_tags(&self.tags),
            author: clean_optional(self.author),
            title,
            ..self
        };

        let mut errs = FieldErrors::new();
        errs.require_non_empty("title", &article.title, "Vui lòng nhập tiêu đề");
        errs.max_len("title", &article.title, TITLE_MAX);
        match &article.slug {
            Some(slug) => check_slug(&mut errs, slug),
            None if !article.title.is_empty() => match slugify(&article.title) {
                Ok(slug) => article.slug = Some(slug),
                Err(_) => errs.push("slug", "Không thể tạo đường dẫn từ tiêu đề"),
            },
            None => {}
        }
        if let Some(excerpt) = &article.excerpt {
            errs.max_len("excerpt", excerpt, EXCERPT_MAX);
        }
        errs.require_non_empty("content", &article.content, "Vui lòng nhập nội dung");
        if let Some(url) = &article.cover_image {
            check_cover_image(&mut errs, url);
        }
        errs.require_non_empty("category", &article.category, "Vui lòng chọn danh mục");
        errs.max_len("category", &article.category, CATEGORY_MAX);
        check_tags(&mut errs, &article.tags);
        if let Some(author) = &article.author {
            errs.max_len("author", author, AUTHOR_MAX);
        }
        errs.into_result()?;

        Ok(article)
    }
}

/// Partial article update. Nullable columns use `Option<Option<_>>`:
/// absent = unchanged, `null` = clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub content: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<Option<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(self) -> Result<Self, DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation("Không có trường nào để cập nhật"));
        }

        let patch = Self {
            title: self.title.map(|v| v.trim().to_string()),
            slug: self.slug.map(|v| v.trim().to_string()),
            excerpt: self.excerpt.map(clean_optional),
            content: self.content.map(|v| v.trim().to_string()),
            cover_image: self.cover_image.map(clean_optional),
            category: self.category.map(|v| v.trim().to_string()),
            tags: self.tags.map(normalize_tags),
            author: self.author.map(clean_optional),
            published: self.published,
            featured: self.featured,
        };

        let mut errs = FieldErrors::new();
        if let Some(v) = &patch.title {
            errs.require_non_empty("title", v, "Vui lòng nhập tiêu đề");
            errs.max_len("title", v, TITLE_MAX);
        }
        if let Some(v) = &patch.slug {
            check_slug(&mut errs, v);
        }
        if let Some(Some(v)) = &patch.excerpt {
            errs.max_len("excerpt", v, EXCERPT_MAX);
        }
        if let Some(v) = &patch.content {
            errs.require_non_empty("content", v, "Vui lòng nhập nội dung");
        }
        if let Some(Some(v)) = &patch.cover_image {
            check_cover_image(&mut errs, v);
        }
        if let Some(v) = &patch.category {
            errs.require_non_empty("category", v, "Vui lòng chọn danh mục");
            errs.max_len("category", v, CATEGORY_MAX);
        }
        if let Some(v) = &patch.tags {
            check_tags(&mut errs, v);
        }
        if let Some(Some(v)) = &patch.author {
            errs.max_len("author", v, AUTHOR_MAX);
        }
        errs.into_result()?;

        Ok(patch)
    }
}

/// Normalised list filter for `GET /api/articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub include_drafts: bool,
}
