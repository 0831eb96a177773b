//! HTTP client implementation for the Strava API.
//!
//! This module provides a reqwest-based implementation of the [`StravaClient`](crate::StravaClient) trait.

use crate::config::Config;
use crate::{Activity, ActivityDetail, StravaClient, StravaError, TokenResponse};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Client for the Strava API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestStravaClient {
    base_url: String,
    client_id: String,
    client_secret: SecretString,
    client: reqwest::Client,
}

impl ReqwestStravaClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Strava host, e.g. "https://www.strava.com". OAuth and
    ///   `/api/v3` paths are resolved against it.
    /// * `client_id` - OAuth application client id
    /// * `client_secret` - OAuth application client secret
    pub fn new(
        base_url: &str,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Result<Self, StravaError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("strava-export/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret,
            client,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, StravaError> {
        Self::new(&cfg.base_url, cfg.client_id.clone(), cfg.client_secret.clone())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v3{}", self.base_url, path)
    }

    /// Build a GET request carrying the bearer token.
    fn get_request(&self, url: &str, access_token: &SecretString) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(access_token.expose_secret())
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StravaError> {
        let resp = request.send().await?;
        self.handle_response(resp).await
    }

    /// Handle a response, converting non-2xx statuses to `Rejected`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, StravaError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> StravaError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        StravaError::Rejected {
            status,
            body: body_snippet,
        }
    }
}

#[async_trait]
impl StravaClient for ReqwestStravaClient {
    async fn exchange_token(&self, code: &str) -> Result<TokenResponse, StravaError> {
        let url = format!("{}/oauth/token", self.base_url);
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ];
        tracing::debug!(url = %url, "exchanging authorization code");
        self.execute_json(self.client.post(&url).form(&form)).await
    }

    async fn list_activities(
        &self,
        access_token: &SecretString,
    ) -> Result<Vec<Activity>, StravaError> {
        let url = self.api_url("/athlete/activities");
        tracing::debug!(url = %url, "listing activities");
        self.execute_json(self.get_request(&url, access_token))
            .await
    }

    async fn get_activity(
        &self,
        activity_id: u64,
        access_token: &SecretString,
    ) -> Result<ActivityDetail, StravaError> {
        let url = self.api_url(&format!("/activities/{}", activity_id));
        tracing::debug!(url = %url, "fetching activity detail");
        self.execute_json(self.get_request(&url, access_token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::http_client::ReqwestStravaClient;
    use secrecy::SecretString;

    #[tokio::test]
    async fn client_new_and_basic() {
        let client =
            ReqwestStravaClient::new("http://localhost/", "id", SecretString::new("key".into()))
                .expect("client");
        assert_eq!(client.base_url, "http://localhost");
    }

    #[test]
    fn api_url_joins_version_prefix() {
        let client =
            ReqwestStravaClient::new("https://www.strava.com", "id", SecretString::new("k".into()))
                .expect("client");
        assert_eq!(
            client.api_url("/activities/9"),
            "https://www.strava.com/api/v3/activities/9"
        );
    }
}
