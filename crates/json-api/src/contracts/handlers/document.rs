//! Contract Document Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use viscend_app::domain::contracts::records::ContractId;

use crate::{contracts::errors::into_status_error, extensions::*, state::State};

/// Contract Document Handler
///
/// Returns the final contract document, ready to print.
#[endpoint(
    tags("contracts"),
    summary = "Get Contract Document",
    responses(
        (status_code = StatusCode::OK, description = "Contract document (text/html)"),
        (status_code = StatusCode::NOT_FOUND, description = "Contract not found"),
    ),
)]
pub(crate) async fn handler(
    contract: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .submissions()
        .get_contract(ContractId::from_uuid(contract.into_inner()))
        .await
        .map_err(into_status_error)?;

    res.render(Text::Html(record.document_html));

    Ok(())
}
