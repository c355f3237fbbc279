pub mod entry;
pub mod policy;
pub mod tier;
