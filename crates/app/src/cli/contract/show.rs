use clap::Args;
use viscend_app::domain::contracts::{ContractsService, PgContractsService};

use crate::cli::{connect, parse_contract_id};

#[derive(Debug, Args)]
pub(crate) struct ShowContractArgs {
    /// Contract id
    contract_id: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ShowContractArgs) -> Result<(), String> {
    let contract_id = parse_contract_id(&args.contract_id)?;
    let service = PgContractsService::new(connect(&args.database_url).await?);

    let contract = service
        .get_contract(contract_id)
        .await
        .map_err(|error| format!("failed to get contract {contract_id}: {error}"))?;

    let draft = &contract.draft;
    let or_none = |value: &str| {
        if value.trim().is_empty() {
            "none".to_string()
        } else {
            value.to_string()
        }
    };

    println!("contract_id: {}", contract.contract_id);
    println!("created_at: {}", contract.created_at);
    println!("language: {}", contract.language);
    println!("client_name: {}", draft.client_name);
    println!("client_email: {}", contract.client_email);
    println!("client_phone: {}", draft.client_phone);
    println!("client_company: {}", or_none(&draft.client_company));
    println!(
        "service_type: {}",
        draft
            .service_type
            .map_or_else(|| "none".to_string(), |service| service.as_str().to_string())
    );
    println!("project_name: {}", draft.project_name);
    println!("project_cost: {}", or_none(&draft.project_cost));
    println!("start_date: {}", or_none(&draft.start_date));
    println!("project_duration: {}", or_none(&draft.project_duration));
    println!("revisions: {}", or_none(&draft.revisions));

    Ok(())
}
