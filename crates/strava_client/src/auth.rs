//! Authorization URL for the browser half of the OAuth2 code flow.

pub const DEFAULT_BASE_URL: &str = "https://www.strava.com";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5000/authorization";
pub const SCOPE: &str = "read,read_all,profile:read_all,activity:read_all";

/// Build the Strava authorization URL the user must visit.
///
/// `client_id` and `redirect_uri` are embedded verbatim.
pub fn build_auth_url(client_id: &str, redirect_uri: &str) -> String {
    build_auth_url_with_base(DEFAULT_BASE_URL, client_id, redirect_uri)
}

pub fn build_auth_url_with_base(base_url: &str, client_id: &str, redirect_uri: &str) -> String {
    format!(
        "{}/oauth/authorize?client_id={}&response_type=code&redirect_uri={}&approval_prompt=force&scope={}",
        base_url.trim_end_matches('/'),
        client_id,
        redirect_uri,
        SCOPE
    )
}
