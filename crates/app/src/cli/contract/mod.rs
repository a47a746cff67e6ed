use clap::{Args, Subcommand};

mod document;
mod list;
mod show;

#[derive(Debug, Args)]
pub(crate) struct ContractCommand {
    #[command(subcommand)]
    command: ContractSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContractSubcommand {
    /// List stored contracts, newest first
    List(list::ListContractsArgs),

    /// Show a contract's details
    Show(show::ShowContractArgs),

    /// Print a contract's final HTML document
    Document(document::ContractDocumentArgs),
}

pub(crate) async fn run(command: ContractCommand) -> Result<(), String> {
    match command.command {
        ContractSubcommand::List(args) => list::run(args).await,
        ContractSubcommand::Show(args) => show::run(args).await,
        ContractSubcommand::Document(args) => document::run(args).await,
    }
}
