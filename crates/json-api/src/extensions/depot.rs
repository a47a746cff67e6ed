//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use crate::observability::REQUEST_ID_DEPOT_KEY;

pub(crate) trait DepotExt {
    /// Typed depot value, or a 500 when it was never injected.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Request id assigned by the request logging middleware.
    fn request_id(&self) -> &str;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn request_id(&self) -> &str {
        self.get::<String>(REQUEST_ID_DEPOT_KEY)
            .map_or("-", String::as_str)
    }
}
