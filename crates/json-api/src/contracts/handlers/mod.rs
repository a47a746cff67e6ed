//! Contract Handlers

pub(crate) mod document;
pub(crate) mod get;
pub(crate) mod send_verification;
pub(crate) mod submit;
