pub mod schema;
pub mod contact_repo;
pub mod address_repo;
pub mod group_repo;
