use std::process::ExitCode;

use dotenvy::dotenv;
use models::movie;
use service::runtime::open_store;
use service::seed::{self, SeedCommand, UNKNOWN_COMMAND};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let Some(command) = SeedCommand::parse(std::env::args().skip(1)) else {
        println!("{UNKNOWN_COMMAND}");
        return ExitCode::SUCCESS;
    };

    match run(command).await {
        Ok(outcome) => {
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "seed", event = "seed_failed", error = %e, "seed run failed");
            let verb = match command {
                SeedCommand::Insert => "insert",
                SeedCommand::Delete => "delete",
            };
            eprintln!("Failed to {verb} movies: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: SeedCommand) -> anyhow::Result<seed::SeedOutcome> {
    let cfg = configs::AppConfig::load_and_validate()?;
    service::runtime::ensure_env(&cfg.storage, None).await?;
    let store = open_store(movie::definition(), &cfg.storage).await?;
    Ok(seed::run(command, &store, &cfg.seed.movies_path).await?)
}
