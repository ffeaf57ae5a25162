//! SeaORM adapters. Functions are generic over `ConnectionTrait` and return
//! `DbErr`; the repos layer maps errors to `DomainError`.

pub mod articles_sea;
pub mod contacts_sea;
pub mod domain_contacts_sea;
pub mod equipment_sea;
pub mod page_contents_sea;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// Escape `%`, `_` and `\` for a LIKE pattern using `\` as the escape char.
pub(crate) fn like_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `lower(col) LIKE '%needle%'`, needle lower-cased and escaped.
pub(crate) fn contains_ci<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", like_escape(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}
