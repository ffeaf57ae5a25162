//! Collision-free test data.
//!
//! Integration tests may share one Postgres database, so anything behind a
//! unique index (slugs, SKUs) or looked up by value gets a ULID suffix.

use ulid::Ulid;

/// `{prefix}-{ULID}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("Khách");
/// assert_ne!(a, unique_str("Khách"));
/// assert!(a.starts_with("Khách-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// Lower-case address on a reserved test domain.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("lien-he");
/// assert!(email.ends_with("@congty.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@congty.test", Ulid::new()).to_lowercase()
}

/// Upper-case SKU that passes catalogue validation.
///
/// ```
/// use backend_test_support::unique_helpers::unique_sku;
///
/// let sku = unique_sku("ssd");
/// assert!(sku.starts_with("SSD-"));
/// assert_eq!(sku, sku.to_uppercase());
/// ```
pub fn unique_sku(prefix: &str) -> String {
    format!("{}-{}", prefix.to_uppercase(), Ulid::new())
}

/// Lower-case slug.
///
/// ```
/// use backend_test_support::unique_helpers::unique_slug;
///
/// let slug = unique_slug("bai-viet");
/// assert!(slug.starts_with("bai-viet-"));
/// assert_eq!(slug, slug.to_lowercase());
/// ```
pub fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new()).to_lowercase()
}
