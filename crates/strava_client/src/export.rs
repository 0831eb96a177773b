//! Token exchange, activity fetch and JSON output for one export run.
//!
//! Every remote call is converted into a [`FetchOutcome`] so a failed call
//! is logged once and the run degrades instead of aborting. Only file output
//! errors propagate.

use crate::{Activity, ActivityDetail, FetchOutcome, StravaClient, StravaError, TokenResponse};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "./data/activities";
pub const ACTIVITIES_FILE: &str = "run_data.json";
pub const DETAILS_FILE: &str = "detailed_run_data.json";

/// Where one run writes its two files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPaths {
    pub activities: PathBuf,
    pub details: PathBuf,
}

impl ExportPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            activities: dir.join(ACTIVITIES_FILE),
            details: dir.join(DETAILS_FILE),
        }
    }
}

impl Default for ExportPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_OUTPUT_DIR)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub activities: usize,
    pub details: usize,
    /// Ids whose detail fetch failed and were left out of the detail file.
    pub skipped: Vec<u64>,
    /// Listed records with no integer `id`; no detail was requested for them.
    pub without_id: usize,
}

/// Details fetched for one activity list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailBatch {
    pub details: Vec<ActivityDetail>,
    pub failed: Vec<u64>,
    pub without_id: usize,
}

#[derive(Debug)]
pub enum ExportOutcome {
    Written(ExportSummary),
    /// No access token was obtained; nothing was fetched or written.
    NoToken(FetchOutcome<TokenResponse>),
}

/// Exchange `code` for a token, or report `NotAttempted` when there is none.
pub async fn exchange_code(
    client: &dyn StravaClient,
    code: Option<&str>,
) -> FetchOutcome<TokenResponse> {
    let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
        tracing::warn!("no authorization code supplied; token exchange not attempted");
        return FetchOutcome::NotAttempted;
    };
    let result = client.exchange_token(code.trim()).await;
    let outcome = FetchOutcome::from_result(result, "token exchange");
    if let FetchOutcome::Fetched(token) = &outcome {
        match &token.athlete {
            Some(a) => tracing::info!(athlete_id = a.id, "token exchange succeeded"),
            None => tracing::info!("token exchange succeeded"),
        }
    }
    outcome
}

/// First page of activities; empty when the call fails.
pub async fn fetch_activities(client: &dyn StravaClient, token: &SecretString) -> Vec<Activity> {
    let activities =
        FetchOutcome::from_result(client.list_activities(token).await, "fetching activities")
            .fetched()
            .unwrap_or_default();
    tracing::info!(count = activities.len(), "fetched activity list");
    activities
}

/// Fetch details one at a time in list order. Failed ids are returned
/// separately and left out of the detail list; records without an integer
/// `id` are counted and never requested.
pub async fn fetch_details(
    client: &dyn StravaClient,
    token: &SecretString,
    activities: &[Activity],
) -> DetailBatch {
    let mut batch = DetailBatch {
        details: Vec::with_capacity(activities.len()),
        ..DetailBatch::default()
    };
    for (index, activity) in activities.iter().enumerate() {
        let Some(id) = activity.id() else {
            tracing::warn!(index, "activity has no integer id; detail not fetched");
            batch.without_id += 1;
            continue;
        };
        let what = format!("fetching activity {}", id);
        match FetchOutcome::from_result(client.get_activity(id, token).await, &what) {
            FetchOutcome::Fetched(d) => batch.details.push(d),
            _ => batch.failed.push(id),
        }
    }
    batch
}

/// Overwrite `path` with `items` as a compact JSON array.
///
/// The parent directory must already exist; the file is written in place.
pub async fn write_json<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StravaError> {
    let bytes = serde_json::to_vec(items)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StravaError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Run the whole export: token, list, details, then both files.
pub async fn run_export(
    client: &dyn StravaClient,
    code: Option<&str>,
    paths: &ExportPaths,
) -> Result<ExportOutcome, StravaError> {
    let token = match exchange_code(client, code).await {
        FetchOutcome::Fetched(token) => token,
        other => return Ok(ExportOutcome::NoToken(other)),
    };

    let activities = fetch_activities(client, &token.access_token).await;
    let batch = fetch_details(client, &token.access_token, &activities).await;

    write_json(&paths.activities, &activities).await?;
    write_json(&paths.details, &batch.details).await?;

    let summary = ExportSummary {
        activities: activities.len(),
        details: batch.details.len(),
        skipped: batch.failed,
        without_id: batch.without_id,
    };
    tracing::info!(
        activities = summary.activities,
        details = summary.details,
        skipped = summary.skipped.len(),
        without_id = summary.without_id,
        "Data saved successfully."
    );
    Ok(ExportOutcome::Written(summary))
}
