pub mod articles;
pub mod contacts;
pub mod domain_contacts;
pub mod page_contents;
pub mod server_equipment;

pub use articles::Entity as Articles;
pub use contacts::Entity as Contacts;
pub use domain_contacts::Entity as DomainContacts;
pub use page_contents::Entity as PageContents;
pub use server_equipment::Entity as ServerEquipment;
