use strava_client::{auth::build_auth_url_with_base, config::Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects STRAVA_CLIENT_ID in env
    let cfg = Config::from_env()?;
    let url = build_auth_url_with_base(&cfg.base_url, &cfg.client_id, &cfg.redirect_uri);
    println!("Visit this URL to authorize: {}", url);
    Ok(())
}
