pub mod credentials;
pub mod jwt;
