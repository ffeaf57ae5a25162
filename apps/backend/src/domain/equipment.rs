//! Server equipment catalogue input rules.

use lazy_regex::regex_is_match;
use serde::Deserialize;

use crate::domain::contact::clean_optional;
use crate::domain::validation::FieldErrors;
use crate::errors::domain::DomainError;

pub const SKU_MAX: usize = 64;
pub const NAME_MAX: usize = 255;
pub const CATEGORY_MAX: usize = 100;
pub const BRAND_MAX: usize = 100;
pub const IMAGE_URL_MAX: usize = 500;

fn check_sku(errs: &mut FieldErrors, sku: &str) {
    errs.require_non_empty("sku", sku, "Vui lòng nhập mã sản phẩm");
    errs.max_len("sku", sku, SKU_MAX);
    if !sku.is_empty() && !regex_is_match!(r"^[A-Z0-9][A-Z0-9._-]*$", sku) {
        errs.push("sku", "Mã sản phẩm chỉ gồm chữ in hoa, số và . _ -");
    }
}

fn check_price(errs: &mut FieldErrors, price_vnd: i64) {
    if price_vnd < 0 {
        errs.push("price_vnd", "Giá không được âm");
    }
}

fn check_stock(errs: &mut FieldErrors, stock: i32) {
    if stock < 0 {
        errs.push("stock", "Số lượng tồn kho không được âm");
    }
}

fn check_image_url(errs: &mut FieldErrors, url: &str) {
    errs.max_len("image_url", url, IMAGE_URL_MAX);
    if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')) {
        errs.push("image_url", "Đường dẫn ảnh không hợp lệ");
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEquipment {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_vnd: i64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl NewEquipment {
    /// SKUs are stored upper-cased.
    pub fn validate(self) -> Result<Self, DomainError> {
        let item = Self {
            sku: self.sku.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            brand: clean_optional(self.brand),
            description: clean_optional(self.description),
            image_url: clean_optional(self.image_url),
            ..self
        };

        let mut errs = FieldErrors::new();
        check_sku(&mut errs, &item.sku);
        errs.require_non_empty("name", &item.name, "Vui lòng nhập tên sản phẩm");
        errs.max_len("name", &item.name, NAME_MAX);
        errs.require_non_empty("category", &item.category, "Vui lòng chọn danh mục");
        errs.max_len("category", &item.category, CATEGORY_MAX);
        if let Some(brand) = &item.brand {
            errs.max_len("brand", brand, BRAND_MAX);
        }
        check_price(&mut errs, item.price_vnd);
        check_stock(&mut errs, item.stock);
        if let Some(url) = &item.image_url {
            check_image_url(&mut errs, url);
        }
        errs.into_result()?;

        Ok(item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub price_vnd: Option<i64>,
    pub stock: Option<i32>,
    pub image_url: Option<Option<String>>,
    pub active: Option<bool>,
}

impl EquipmentPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(self) -> Result<Self, DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation("Không có trường nào để cập nhật"));
        }

        let patch = Self {
            sku: self.sku.map(|v| v.trim().to_uppercase()),
            name: self.name.map(|v| v.trim().to_string()),
            category: self.category.map(|v| v.trim().to_string()),
            brand: self.brand.map(clean_optional),
            description: self.description.map(clean_optional),
            image_url: self.image_url.map(clean_optional),
            ..self
        };

        let mut errs = FieldErrors::new();
        if let Some(v) = &patch.sku {
            check_sku(&mut errs, v);
        }
        if let Some(v) = &patch.name {
            errs.require_non_empty("name", v, "Vui lòng nhập tên sản phẩm");
            errs.max_len("name", v, NAME_MAX);
        }
        if let Some(v) = &patch.category {
            errs.require_non_empty("category", v, "Vui lòng chọn danh mục");
            errs.max_len("category", v, CATEGORY_MAX);
        }
        if let Some(Some(v)) = &patch.brand {
            errs.max_len("brand", v, BRAND_MAX);
        }
        if let Some(v) = patch.price_vnd {
            check_price(&mut errs, v);
        }
        if let Some(v) = patch.stock {
            check_stock(&mut errs, v);
        }
        if let Some(Some(v)) = &patch.image_url {
            check_image_url(&mut errs, v);
        }
        errs.into_result()?;

        Ok(patch)
    }
}
