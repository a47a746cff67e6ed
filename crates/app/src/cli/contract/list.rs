use clap::Args;
use viscend_app::domain::contracts::{ContractsService, PgContractsService};

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ListContractsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListContractsArgs) -> Result<(), String> {
    let service = PgContractsService::new(connect(&args.database_url).await?);

    let contracts = service
        .list_contracts()
        .await
        .map_err(|error| format!("failed to list contracts: {error}"))?;

    if contracts.is_empty() {
        println!("no contracts found");
        return Ok(());
    }

    for contract in contracts {
        println!("contract_id: {}", contract.contract_id);
        println!("client_email: {}", contract.client_email);
        println!("client_name: {}", contract.draft.client_name);
        println!("project_name: {}", contract.draft.project_name);
        println!("language: {}", contract.language);
        println!("created_at: {}", contract.created_at);
        println!();
    }

    Ok(())
}
