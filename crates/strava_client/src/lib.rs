//! Minimal `StravaClient` trait, data model and a reqwest-based implementation.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod auth;
pub mod config;
pub mod export;
pub mod http_client;

#[derive(Debug, Error)]
pub enum StravaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rejected by strava ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Body of a successful `/oauth/token` response.
///
/// Only `access_token` is required; Strava also returns refresh and expiry
/// information plus a summary of the athlete who granted access.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(deserialize_with = "deserialize_secret")]
    pub access_token: SecretString,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_secret")]
    pub refresh_token: Option<SecretString>,
    #[serde(default)]
    pub athlete: Option<AthleteSummary>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AthleteSummary {
    pub id: u64,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// Summary record returned by `/athlete/activities`.
///
/// The record is kept exactly as Strava sent it, nulls and unknown fields
/// included, so it is written back out unchanged. Typed access goes through
/// the accessors.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Activity(pub serde_json::Value);

impl Activity {
    /// Integer `id`, if the record has one.
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(serde_json::Value::as_u64)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }
}

/// Full record returned by `/activities/{id}`, kept verbatim.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ActivityDetail(pub serde_json::Value);

impl ActivityDetail {
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(serde_json::Value::as_u64)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(serde_json::Value::as_str)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(SecretString::new(value.into()))
}

fn deserialize_opt_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| SecretString::new(s.into())))
}

#[async_trait]
pub trait StravaClient: Send + Sync + 'static {
    /// Trade an authorization code for an access token.
    async fn exchange_token(&self, code: &str) -> Result<TokenResponse, StravaError>;

    /// First page of the authenticated athlete's activities.
    async fn list_activities(
        &self,
        access_token: &SecretString,
    ) -> Result<Vec<Activity>, StravaError>;

    async fn get_activity(
        &self,
        activity_id: u64,
        access_token: &SecretString,
    ) -> Result<ActivityDetail, StravaError>;
}

/// Result of one remote call as seen by the export pipeline.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Fetched(T),
    /// The call was skipped because its input was unavailable.
    NotAttempted,
    TransportFailure(String),
    Rejected { status: u16, body: String },
}

impl<T> FetchOutcome<T> {
    /// Convert a client result, logging any failure once under `what`.
    pub fn from_result(result: Result<T, StravaError>, what: &str) -> Self {
        match result {
            Ok(v) => FetchOutcome::Fetched(v),
            Err(StravaError::Rejected { status, body }) => {
                tracing::error!(status, body = %body, "{what} failed: rejected by strava");
                FetchOutcome::Rejected { status, body }
            }
            Err(e) => {
                tracing::error!(error = %e, "{what} failed");
                FetchOutcome::TransportFailure(e.to_string())
            }
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched(_))
    }

    pub fn fetched(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(v) => Some(v),
            _ => None,
        }
    }
}
