use clap::Args;
use viscend_app::domain::contracts::{ContractsService, PgContractsService};

use crate::cli::{connect, parse_contract_id};

#[derive(Debug, Args)]
pub(crate) struct ContractDocumentArgs {
    /// Contract id
    contract_id: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ContractDocumentArgs) -> Result<(), String> {
    let contract_id = parse_contract_id(&args.contract_id)?;
    let service = PgContractsService::new(connect(&args.database_url).await?);

    let contract = service
        .get_contract(contract_id)
        .await
        .map_err(|error| format!("failed to get contract {contract_id}: {error}"))?;

    println!("{}", contract.document_html);

    Ok(())
}
