pub mod attribute_slot;
pub mod company;
pub mod domain_name;
