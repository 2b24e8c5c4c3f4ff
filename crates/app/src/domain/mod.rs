//! Optical Store Domain Concerns

pub mod carts;
pub mod catalog;
pub mod users;
