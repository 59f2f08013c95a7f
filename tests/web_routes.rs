use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;
use talent_match::core::config_manager::FileSettings;
use talent_match::web::{build_rocket, AppState};
use talent_match::ConfigManager;

async fn client() -> Client {
    let config = ConfigManager::from_sources("local".to_string(), FileSettings::default(), |_| None)
        .expect("default config");
    let state = AppState::from_config(&config).expect("state builds without network");
    Client::tracked(build_rocket(state, 0))
        .await
        .expect("valid rocket instance")
}

#[rocket::async_test]
async fn health_reports_ok() {
    let client = client().await;
    let response = client.get("/api/health").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["type"], "text");
    assert_eq!(body["message"], "OK");
}

#[rocket::async_test]
async fn parse_normalizes_pasted_text() {
    let client = client().await;
    let response = client
        .post("/api/parse")
        .header(ContentType::JSON)
        .body(r#"{"name":"Jane","text":"Line1\nLine2"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("json body");
    let profile = &body["data"];
    assert_eq!(profile["fullName"], "Jane");
    assert_eq!(profile["pictureUrl"], "/images/user.png");
    assert_eq!(profile["data"], "Line1 Line2");
    assert_eq!(profile["id"], "");
}

#[rocket::async_test]
async fn parse_rejects_missing_name() {
    let client = client().await;
    let response = client
        .post("/api/parse")
        .header(ContentType::JSON)
        .body(r#"{"name":"  ","text":"anything"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "BAD_REQUEST");
}

#[rocket::async_test]
async fn normalize_flattens_provider_profile() {
    let client = client().await;
    let response = client
        .post("/api/profile/normalize")
        .header(ContentType::JSON)
        .body(
            r#"{
                "id": "li-42",
                "formattedName": "Ana Lima",
                "summary": "Platform engineer",
                "location": { "name": "Lisbon" },
                "skills": { "_total": 2, "values": [
                    { "skill": { "name": "Rust" } },
                    { "skill": { "name": "Kafka" } }
                ] }
            }"#,
        )
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("json body");
    let profile = &body["data"];
    assert_eq!(profile["id"], "li-42");
    assert_eq!(profile["fullName"], "Ana Lima");
    assert_eq!(profile["data"], "Platform engineer. Lisbon. Rust, Kafka. ");
}

#[rocket::async_test]
async fn documents_without_ids_are_rejected_before_any_service_call() {
    let client = client().await;

    let job = client
        .put("/api/ci/jobs")
        .header(ContentType::JSON)
        .body(r#"{"title":"Rust developer","description":"Services"}"#)
        .dispatch()
        .await;
    assert_eq!(job.status(), Status::BadRequest);

    let candidate = client
        .put("/api/ci/candidates")
        .header(ContentType::JSON)
        .body(r#"{"fullName":"Jane","data":"Rust"}"#)
        .dispatch()
        .await;
    assert_eq!(candidate.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn graph_search_requires_ids() {
    let client = client().await;
    let response = client.get("/api/ci/graph_search").dispatch().await;

    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn unknown_route_returns_json_error() {
    let client = client().await;
    let response = client.get("/api/nowhere").dispatch().await;

    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["error_code"], "NOT_FOUND");
}
