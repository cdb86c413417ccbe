use std::time::Duration;

use careermatch_client::{ApiClient, ApiErrorKind, ApiSettings, ReqwestApiClient};
use careermatch_core::{AccessToken, Credentials};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestApiClient {
    let settings = ApiSettings {
        base_url: format!("{}/api", server.uri()),
        ..ApiSettings::default()
    };
    ReqwestApiClient::new(&settings).expect("client")
}

#[tokio::test]
async fn login_posts_credentials_and_returns_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "ada", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "jwt-1", "refresh": "r"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .login(&Credentials::new("ada", "secret"))
        .await
        .expect("login ok");
    assert_eq!(token, AccessToken::new("jwt-1"));
}

#[tokio::test]
async fn login_rejection_uses_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&Credentials::new("a", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Auth);
    assert_eq!(err.message, "Invalid credentials");
}

#[tokio::test]
async fn login_server_error_without_detail_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&Credentials::new("a", "b"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus(500));
    assert_eq!(err.message, "Request failed with status code 500");
}

#[tokio::test]
async fn login_network_failure_is_reported() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let settings = ApiSettings {
        base_url: format!("http://127.0.0.1:{port}"),
        ..ApiSettings::default()
    };
    let client = ReqwestApiClient::new(&settings).unwrap();
    let err = client
        .login(&Credentials::new("a", "b"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn matches_are_parsed_in_server_order_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42/matches"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"resume_id": "r2", "user": "grace", "compatibility_score": 91.5,
                 "matched_skills": "Go", "resume_skills": "go", "resume_experience": "4.0 years"},
                {"resume_id": "r1", "user": "", "compatibility_score": 87.25,
                 "matched_skills": "Go, SQL", "resume_skills": "go, sql", "resume_experience": "2.0 years"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = AccessToken::new("jwt-1");
    let matches = client_for(&server)
        .job_matches("42", Some(&token))
        .await
        .expect("matches ok");

    assert_eq!(
        matches.iter().map(|m| m.resume_id.as_str()).collect::<Vec<_>>(),
        vec!["r2", "r1"]
    );
    assert_eq!(matches[1].compatibility_score, 87.25);
    assert_eq!(matches[1].display_name(), "Anonymous");
    assert_eq!(matches[0].resume_experience, "4.0 years");
}

#[tokio::test]
async fn empty_match_list_is_a_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let matches = client_for(&server).job_matches("42", None).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn job_id_is_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/a%2Fb/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).job_matches("a/b", None).await.unwrap();
}

#[tokio::test]
async fn blank_job_id_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).job_matches("  ", None).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidRequest);
}

#[tokio::test]
async fn unauthorized_matches_call_flags_expired_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42/matches"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Given token not valid for any token type"})),
        )
        .mount(&server)
        .await;

    let token = AccessToken::new("old");
    let err = client_for(&server)
        .job_matches("42", Some(&token))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Given token not valid for any token type");

    let failure = careermatch_core::RequestFailure::from(err);
    assert!(failure.session_expired);
}

#[tokio::test]
async fn invalid_scores_are_rejected_at_the_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"resume_id": "r1", "compatibility_score": -3.0}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).job_matches("42", None).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidPayload);
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42/matches"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"data": []})),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        base_url: format!("{}/api", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    };
    let client = ReqwestApiClient::new(&settings).unwrap();
    let err = client.job_matches("42", None).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Timeout);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let settings = ApiSettings {
        base_url: format!("{}/api", server.uri()),
        max_body_bytes: 16,
        ..ApiSettings::default()
    };
    let client = ReqwestApiClient::new(&settings).unwrap();
    let err = client.job_matches("42", None).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::TooLarge { max_bytes: 16 });
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    };
    let err = ReqwestApiClient::new(&settings).unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidRequest);
}
