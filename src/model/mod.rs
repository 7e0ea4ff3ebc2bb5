pub mod ids;
pub mod contact;
pub mod address;
pub mod address_type;
pub mod household;
pub mod group;
pub mod label;
pub mod entity;

// Re-exports for convenience
pub use ids::Id;
pub use contact::Contact;
pub use address::{Address, AddressInput, BAD_PHONE_FORMAT, MISSING_PHONE_OR_ADDRESS};
pub use address_type::AddressType;
pub use household::Household;
pub use group::Group;
pub use label::{LabelSheet, LabelTemplate, MailingLabel};
pub use entity::EntityRef;
