//! Database infrastructure - pool building, migrations and the migration lock.

pub mod core;
pub mod locking;

pub use core::{bootstrap_db, build_admin_pool, build_pool, orchestrate_migration};
pub use locking::PgAdvisoryLock;
