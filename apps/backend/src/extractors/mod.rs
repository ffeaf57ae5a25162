pub mod auth_token;
pub mod current_admin;
pub mod validated_json;

pub use auth_token::AuthToken;
pub use current_admin::{CurrentAdmin, MaybeAdmin};
pub use validated_json::{JsonBodyLimit, ValidatedJson};
