use clap::{Parser, Subcommand};
use viscend_app::{
    database::{self, Db},
    domain::contracts::records::ContractId,
};

mod challenges;
mod contract;

#[derive(Debug, Parser)]
#[command(name = "viscend-app", about = "VisCend CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Contract(contract::ContractCommand),
    Challenges(challenges::ChallengesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Contract(command) => contract::run(command).await,
            Commands::Challenges(command) => challenges::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}

fn parse_contract_id(value: &str) -> Result<ContractId, String> {
    value
        .parse()
        .map_err(|error| format!("invalid contract id {value:?}: {error}"))
}
