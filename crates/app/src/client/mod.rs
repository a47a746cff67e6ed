//! Contract Backends
//!
//! [`ContractBackend`](viscend::backend::ContractBackend) implementations for
//! driving the wizard against a remote API or an in-process service.

mod http;
mod local;

pub use http::HttpContractBackend;
pub use local::{Clock, LocalContractBackend};
