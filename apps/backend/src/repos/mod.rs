//! Repository functions for the domain layer (generic over ConnectionTrait).
//!
//! Repos call the SeaORM adapters, translate `DbErr` through
//! `infra::db_errors`, and convert rows into domain structs.

pub mod articles;
pub mod contacts;
pub mod domain_contacts;
pub mod equipment;
pub mod page_contents;
