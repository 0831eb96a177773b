use crate::StravaError;
use crate::auth::{DEFAULT_BASE_URL, DEFAULT_REDIRECT_URI};
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, StravaError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. Missing credentials are sent as empty strings and left for
    /// Strava to reject.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, StravaError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let client_id = get("STRAVA_CLIENT_ID").unwrap_or_else(|| {
            tracing::warn!("STRAVA_CLIENT_ID is not set");
            String::new()
        });
        let client_secret = get("STRAVA_CLIENT_SECRET").unwrap_or_else(|| {
            tracing::warn!("STRAVA_CLIENT_SECRET is not set");
            String::new()
        });
        let redirect_uri =
            get("STRAVA_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.into());
        let base_url = get("STRAVA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(StravaError::Config(format!(
                "STRAVA_BASE_URL must be an http(s) URL, got {base_url:?}"
            )));
        }
        Ok(Self {
            client_id: client_id.trim().to_string(),
            client_secret: SecretString::new(client_secret.trim().into()),
            redirect_uri,
            base_url,
        })
    }
}
