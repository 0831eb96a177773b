use secrecy::SecretString;
use strava_client::{StravaClient, config::Config, http_client::ReqwestStravaClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env()?;
    let client = ReqwestStravaClient::from_config(&cfg)?;

    let token = std::env::var("STRAVA_ACCESS_TOKEN")
        .map_err(|_| "STRAVA_ACCESS_TOKEN must hold a token from a previous exchange")?;
    let token = SecretString::new(token.into());

    let activities = client
        .list_activities(&token)
        .await
        .map_err(|e| format!("failed to fetch activities: {}", e))?;

    if activities.is_empty() {
        println!("No recent activities returned (check the token scope)");
        return Ok(());
    }

    println!("Recent activities:");
    for a in activities {
        let id = a.id().map(|id| id.to_string()).unwrap_or_else(|| "?".to_string());
        println!("- {} - {}", id, a.name().unwrap_or("(no name)"));
    }

    Ok(())
}
