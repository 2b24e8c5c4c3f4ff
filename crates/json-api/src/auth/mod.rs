//! Authentication and authorisation hoops

pub(crate) mod admin;
pub(crate) mod middleware;
