//! URL slugs for articles.

use lazy_regex::regex_is_match;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::validation::FieldError;
use crate::errors::domain::DomainError;

pub const MAX_SLUG_LEN: usize = 120;

/// Lower-case ASCII slug of `title` with Vietnamese diacritics removed.
///
/// `"Hướng dẫn: Đăng ký tên miền .VN"` becomes `"huong-dan-dang-ky-ten-mien-vn"`.
pub fn slugify(title: &str) -> Result<String, DomainError> {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.nfd().filter(|c| !is_combining_mark(*c)) {
        let c = match c {
            'đ' | 'Đ' => 'd',
            other => other.to_ascii_lowercase(),
        };
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    if slug.is_empty() {
        return Err(DomainError::invalid_fields(vec![FieldError::new(
            "slug",
            "Không thể tạo đường dẫn từ tiêu đề",
        )]));
    }
    Ok(slug)
}

pub fn is_valid_slug(s: &str) -> bool {
    s.len() <= MAX_SLUG_LEN && regex_is_match!(r"^[a-z0-9]+(-[a-z0-9]+)*$", s)
}
