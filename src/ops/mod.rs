pub mod address_ops;
pub mod contact_ops;
pub mod group_ops;
