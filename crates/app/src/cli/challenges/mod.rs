use clap::{Args, Subcommand};

mod purge;

#[derive(Debug, Args)]
pub(crate) struct ChallengesCommand {
    #[command(subcommand)]
    command: ChallengesSubcommand,
}

#[derive(Debug, Subcommand)]
enum ChallengesSubcommand {
    /// Delete expired and used verification challenges
    Purge(purge::PurgeChallengesArgs),
}

pub(crate) async fn run(command: ChallengesCommand) -> Result<(), String> {
    match command.command {
        ChallengesSubcommand::Purge(args) => purge::run(args).await,
    }
}
