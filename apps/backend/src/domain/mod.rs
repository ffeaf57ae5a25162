//! Domain layer: validation rules and pure business logic, no HTTP or DB.

pub mod article;
pub mod cart;
pub mod contact;
pub mod domain_contact;
pub mod equipment;
pub mod page_content;
pub mod paging;
pub mod pending_changes;
pub mod slug;
pub mod validation;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_cart;
#[cfg(test)]
mod tests_props_pending_changes;

pub use cart::{Cart, CartItem};
pub use paging::PageRequest;
pub use pending_changes::{ContentSink, PendingChanges, SaveReport};
pub use validation::{FieldError, FieldErrors};
