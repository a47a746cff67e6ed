use clap::Args;
use jiff::Timestamp;
use viscend_app::domain::challenges::{ChallengesService, PgChallengesService};

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct PurgeChallengesArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PurgeChallengesArgs) -> Result<(), String> {
    let service = PgChallengesService::new(connect(&args.database_url).await?);

    let purged = service
        .purge_expired(Timestamp::now())
        .await
        .map_err(|error| format!("failed to purge challenges: {error}"))?;

    println!("purged_challenges: {purged}");

    Ok(())
}
