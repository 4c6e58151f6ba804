pub mod catalog;
pub mod payments;
