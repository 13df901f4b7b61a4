pub mod catalog;
pub mod filter;
pub mod form;
pub mod seed;
