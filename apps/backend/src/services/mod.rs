//! Domain services. Each service validates input, calls the repos and
//! reports failures as `DomainError`.

pub mod articles;
pub mod cart;
pub mod contacts;
pub mod content;
pub mod domain_contacts;
pub mod equipment;
