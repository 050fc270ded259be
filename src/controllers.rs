pub mod catalog;
pub mod downloads;
