//! Command-line front end for the Strava activity export.

use clap::Parser;
use std::path::PathBuf;
use strava_client::FetchOutcome;
use strava_client::auth::build_auth_url_with_base;
use strava_client::config::Config;
use strava_client::export::{DEFAULT_OUTPUT_DIR, ExportOutcome, ExportPaths, run_export};
use strava_client::http_client::ReqwestStravaClient;

const QUIET_DEPS: &str = "hyper=warn,reqwest=warn";

/// Export Strava activities and their details to JSON files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Authorization code from the redirect after visiting the printed URL
    #[arg(long, env = "STRAVA_AUTH_CODE")]
    pub code: Option<String>,

    /// Directory that receives run_data.json and detailed_run_data.json
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

/// Log filter from `STRAVA_EXPORT_LOG_LEVEL`, then `RUST_LOG`, then `info`.
pub fn log_level_from_env() -> String {
    log_level_from_env_with(|k| std::env::var(k).ok())
}

pub fn log_level_from_env_with<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get("STRAVA_EXPORT_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

pub fn build_env_filter(log_env: &str) -> tracing_subscriber::EnvFilter {
    let combined_filter = format!("{},{}", log_env, QUIET_DEPS);
    tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("info,{QUIET_DEPS}")))
}

/// Print the authorization URL, then run the export if a code was given.
pub async fn run(cli: &Cli, config: &Config) -> anyhow::Result<ExportOutcome> {
    let url = build_auth_url_with_base(&config.base_url, &config.client_id, &config.redirect_uri);
    println!("Visit this URL to authorize: {}", url);

    let client = ReqwestStravaClient::from_config(config)?;
    let paths = ExportPaths::in_dir(&cli.output_dir);
    let outcome = run_export(&client, cli.code.as_deref(), &paths).await?;

    match &outcome {
        ExportOutcome::Written(summary) => tracing::info!(
            activities = %paths.activities.display(),
            details = %paths.details.display(),
            skipped = ?summary.skipped,
            "export finished"
        ),
        ExportOutcome::NoToken(FetchOutcome::NotAttempted) => tracing::info!(
            "authorize in the browser, then rerun with --code <CODE> or STRAVA_AUTH_CODE"
        ),
        ExportOutcome::NoToken(_) => tracing::warn!("no access token; nothing was exported"),
    }
    Ok(outcome)
}
