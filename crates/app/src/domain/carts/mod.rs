//! Carts

pub mod errors;
pub mod models;
mod repositories;
pub mod service;
pub mod view;

pub use errors::{CartsErrorKind, CartsServiceError};
pub use service::*;
