//! Backend test support utilities
//!
//! Logging initialisation, response-envelope assertions and unique test data
//! shared by the backend's unit and integration tests.

pub mod envelope;
pub mod logging;
pub mod unique_helpers;
