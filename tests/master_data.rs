use axum::http::{Method, StatusCode};
use entity::MasterRecord;
use platform_backend::{Backend, BackendConfig, MasterKind};
use serde_json::json;
use workforce_server::master::check_backend;
use workforce_tests::{MockBackend, TestApp};

const BEARER: (&str, &str) = ("authorization", "Bearer token-asha");

#[tokio::test]
async fn login_sets_session_cookie_used_for_me() {
    let app = TestApp::start().await;
    let response = app
        .request(
            Method::POST,
            "/auth/login",
            &[],
            Some(json!({"username": "asha", "password": "secret"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], json!("asha"));
    let cookie = response.session_cookie().expect("session cookie");
    assert!(cookie.starts_with("wf_session="));
    assert!(!cookie.contains("token-asha"), "cookie must be encrypted");

    let me = app
        .request(Method::GET, "/api/me", &[("cookie", cookie.as_str())], None)
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["username"], json!("asha"));
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let app = TestApp::start().await;
    let response = app.get("/api/me").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], json!("UNAUTHORIZED"));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = TestApp::start().await;
    let response = app
        .request(
            Method::POST,
            "/auth/login",
            &[],
            Some(json!({"username": "asha", "password": "wrong"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            &[],
            Some(json!({"username": " ", "password": "secret"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let app = TestApp::start().await;
    let login = app
        .request(
            Method::POST,
            "/auth/login",
            &[],
            Some(json!({"username": "asha", "password": "secret"})),
        )
        .await;
    let cookie = login.session_cookie().unwrap();

    let response = app
        .request(Method::POST, "/auth/logout", &[("cookie", cookie.as_str())], None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let removal = response.header("set-cookie").unwrap();
    assert!(removal.starts_with("wf_session=;"));
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn department_crud_round_trip() {
    let app = TestApp::start().await;

    let created = app
        .request(
            Method::POST,
            "/api/master/department",
            &[BEARER],
            Some(json!({"code": "LEG", "name": "Legal"})),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.json()["id"].as_i64().unwrap();
    assert_eq!(created.json()["isActive"], json!(true));

    let listed = app
        .request(Method::GET, "/api/master/department", &[BEARER], None)
        .await;
    assert_eq!(listed.json().as_array().map(Vec::len), Some(1));

    let updated = app
        .request(
            Method::PUT,
            &format!("/api/master/department/{id}"),
            &[BEARER],
            Some(json!({"id": 1, "code": "LEG", "name": "Legal & Compliance"})),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["id"], json!(id));

    let fetched = app
        .request(
            Method::GET,
            &format!("/api/master/department/{id}"),
            &[BEARER],
            None,
        )
        .await;
    assert_eq!(fetched.json()["name"], json!("Legal & Compliance"));

    let deleted = app
        .request(
            Method::DELETE,
            &format!("/api/master/department/{id}"),
            &[BEARER],
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app
        .request(
            Method::GET,
            &format!("/api/master/department/{id}"),
            &[BEARER],
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let paths: Vec<_> = app
        .backend
        .calls()
        .into_iter()
        .map(|call| format!("{} {}", call.method, call.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            "POST /department".to_string(),
            "GET /department/all".to_string(),
            format!("PUT /department/{id}"),
            format!("GET /department/{id}"),
            format!("DELETE /department/{id}"),
            format!("GET /department/{id}"),
        ]
    );
    assert!(
        app.backend
            .calls()
            .iter()
            .all(|call| call.authorization.as_deref() == Some("Bearer token-asha"))
    );
}

#[tokio::test]
async fn kind_aliases_reach_the_same_resource() {
    let app = TestApp::start().await;
    app.backend.seed(
        "leaveType",
        vec![json!({"id": 1, "code": "AL", "name": "Annual Leave", "maxDaysPerYear": 20})],
    );
    let response = app
        .request(Method::GET, "/api/master/leave-type", &[BEARER], None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()[0]["name"], json!("Annual Leave"));
    assert_eq!(app.backend.calls()[0].path, "/leaveType/all");
}

#[tokio::test]
async fn invalid_records_are_rejected_before_the_backend() {
    let app = TestApp::start().await;
    let blank = app
        .request(
            Method::POST,
            "/api/master/grade",
            &[BEARER],
            Some(json!({"code": "G9", "name": "", "level": 9})),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert!(blank.json()["error"]["message"].as_str().unwrap().contains("name"));

    let malformed = app
        .request(
            Method::POST,
            "/api/master/holiday",
            &[BEARER],
            Some(json!({"name": "Founders Day", "date": "17/06/2024"})),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn unknown_kind_is_a_bad_request() {
    let app = TestApp::start().await;
    let response = app
        .request(Method::GET, "/api/master/payroll", &[BEARER], None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn backend_auth_failures_pass_through() {
    let app = TestApp::start().await;
    let response = app.get("/api/master/holiday").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn backend_outage_is_a_bad_gateway() {
    let app = TestApp::start().await;
    app.backend.set_failing(true);
    let response = app
        .request(Method::GET, "/api/master/workflow", &[BEARER], None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["error"]["code"], json!("UPSTREAM"));
    assert!(!response.text().contains("maintenance"));
}

#[tokio::test]
async fn lookup_resolves_names_and_falls_back_to_id() {
    let app = TestApp::start().await;
    app.backend.seed(
        "designation",
        vec![json!({"id": 3, "name": "HR Generalist", "departmentId": 3})],
    );

    let found = app
        .request(Method::GET, "/api/lookup/designation/3", &[BEARER], None)
        .await;
    assert_eq!(found.json(), json!({"id": 3, "name": "HR Generalist"}));

    let unknown = app
        .request(Method::GET, "/api/lookup/designation/999", &[BEARER], None)
        .await;
    assert_eq!(unknown.json(), json!({"id": 999, "name": "999"}));
    // Both answers came from a single list call.
    assert_eq!(app.backend.calls().len(), 1);

    app.backend.set_failing(true);
    let fallback = app
        .request(Method::GET, "/api/lookup/grade/4", &[BEARER], None)
        .await;
    assert_eq!(fallback.status, StatusCode::OK);
    assert_eq!(fallback.json()["name"], json!("4"));
}

#[tokio::test]
async fn cached_names_are_not_shared_with_anonymous_callers() {
    let app = TestApp::start().await;
    app.backend.seed(
        "department",
        vec![json!({"id": 1, "code": "SEC", "name": "Secret Projects"})],
    );

    let authed = app
        .request(Method::GET, "/api/lookup/department/1", &[BEARER], None)
        .await;
    assert_eq!(authed.json(), json!({"id": 1, "name": "Secret Projects"}));

    let anonymous = app.get("/api/lookup/department/1").await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.json(), json!({"id": 1, "name": "1"}));

    let calls = app.backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].authorization, None);
}

#[tokio::test]
async fn malformed_paths_and_bodies_answer_with_json_errors() {
    let app = TestApp::start().await;

    let bad_id = app
        .request(Method::GET, "/api/master/department/abc", &[BEARER], None)
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.json()["error"]["code"], json!("INVALID_INPUT"));

    let bad_lookup = app.get("/api/lookup/grade/x1").await;
    assert_eq!(bad_lookup.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_lookup.json()["error"]["code"], json!("INVALID_INPUT"));

    let empty_body = app
        .request(
            Method::POST,
            "/api/master/department",
            &[BEARER, ("content-type", "application/json")],
            None,
        )
        .await;
    assert_eq!(empty_body.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_body.header("content-type"), Some("application/json"));
    assert_eq!(empty_body.json()["error"]["code"], json!("INVALID_INPUT"));

    let no_content_type = app
        .request(Method::POST, "/auth/login", &[], None)
        .await;
    assert_eq!(no_content_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_content_type.json()["error"]["code"], json!("INVALID_INPUT"));

    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn login_does_not_forward_the_service_token() {
    let app = TestApp::with_service_token("svc").await;
    let response = app
        .request(
            Method::POST,
            "/auth/login",
            &[],
            Some(json!({"username": "asha", "password": "secret"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.backend.calls()[0].authorization, None);
}

#[tokio::test]
async fn backend_check_lists_every_kind() {
    let mock = MockBackend::start().await;
    mock.seed(
        entity::SecRole::RESOURCE,
        vec![json!({"id": 1, "roleName": "Administrator"})],
    );
    let mut config = BackendConfig::new(&mock.base_url);
    config.service_token = Some("svc".into());
    let backend = Backend::connect(&config).unwrap();

    let report = check_backend(&backend).await;
    assert_eq!(report.len(), MasterKind::ALL.len());
    for (kind, outcome) in report {
        let expected = usize::from(kind == MasterKind::Role);
        assert_eq!(outcome.unwrap(), expected, "{kind}");
    }
    assert!(
        mock.calls()
            .iter()
            .all(|call| call.authorization.as_deref() == Some("Bearer svc"))
    );
}
