//! VisCend
//!
//! Contract workflow for the VisCend agency: draft validation, email code
//! verification rules, the bilingual contract document and the wizard that
//! drives a client from the form to a stored contract.

pub mod api;
pub mod backend;
pub mod document;
pub mod draft;
pub mod language;
pub mod notices;
pub mod preferences;
pub mod prelude;
pub mod validation;
pub mod verification;
pub mod wizard;
