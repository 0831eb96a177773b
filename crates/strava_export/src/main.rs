use clap::Parser;
use strava_client::config::Config;
use strava_export::{Cli, build_env_filter, log_level_from_env, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment.
    dotenvy::dotenv().ok();

    let log_env = log_level_from_env();
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(build_env_filter(&log_env))
        .init();
    tracing::debug!("strava-export: log filter: {}", log_env);

    let cli = Cli::parse();
    let config = Config::from_env()?;
    run(&cli, &config).await?;
    Ok(())
}
