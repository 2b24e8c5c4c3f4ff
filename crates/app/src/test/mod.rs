//! Service-level test support.

pub(crate) mod db;
pub(crate) mod helpers;

pub(crate) use context::{DEFAULT_USER_EMAIL, TestContext};
