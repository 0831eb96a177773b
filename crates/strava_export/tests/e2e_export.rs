use std::path::Path;
use strava_client::FetchOutcome;
use strava_client::config::Config;
use strava_client::export::ExportOutcome;
use strava_export::{Cli, run};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let base = server.uri();
    Config::from_env_with(|k| match k {
        "STRAVA_CLIENT_ID" => Some("777".into()),
        "STRAVA_CLIENT_SECRET" => Some("secret".into()),
        "STRAVA_BASE_URL" => Some(base.clone()),
        _ => None,
    })
    .expect("config")
}

fn cli(code: Option<&str>, dir: &Path) -> Cli {
    Cli {
        code: code.map(str::to_string),
        output_dir: dir.to_path_buf(),
    }
}

#[tokio::test]
async fn full_run_writes_both_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("client_id=777"))
        .and(body_string_contains("code=the-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "access_token": "T",
            "refresh_token": "R",
            "expires_at": 1900000000,
            "athlete": {"id": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 20, "name": "Evening Run", "type": "Run"},
            {"id": 10, "name": "Morning Swim", "type": "Swim"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    for (id, name) in [(20, "Evening Run"), (10, "Morning Swim")] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v3/activities/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": id, "name": name, "description": "", "splits_metric": []
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let outcome = run(&cli(Some("the-code"), dir.path()), &config_for(&server))
        .await
        .expect("run");
    assert!(matches!(outcome, ExportOutcome::Written(_)));

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("run_data.json")).unwrap()).unwrap();
    assert_eq!(raw[0]["id"], 20);
    assert_eq!(raw[1]["type"], "Swim");

    let detailed: serde_json::Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("detailed_run_data.json")).unwrap(),
    )
    .unwrap();
    let ids: Vec<u64> = detailed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![20, 10]);
}

#[tokio::test]
async fn without_code_only_prints_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run(&cli(None, dir.path()), &config_for(&server))
        .await
        .expect("run");
    assert!(matches!(
        outcome,
        ExportOutcome::NoToken(FetchOutcome::NotAttempted)
    ));
    assert!(!dir.path().join("run_data.json").exists());
}

#[tokio::test]
async fn missing_output_dir_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "T"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("data").join("activities");
    let res = run(&cli(Some("abc"), &missing), &config_for(&server)).await;
    assert!(res.is_err());
    assert!(!missing.exists());
}
