//! End-to-end tests for the API client against a local one-shot HTTP server.
//!
//! The fixture accepts exactly one connection, captures the raw request for
//! assertions, and answers with a canned response. This keeps the tests
//! honest about what actually goes over the wire: request line, headers,
//! and body.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{mpsc, Arc};
use std::thread;

use classbook_core::models::{
    Institution, ProfileUpdate, RegisterRequest, Role, RosterChange, UserProfile,
};
use classbook_core::{ApiClient, ApiError, MemorySessionStore, ResponseBody, SessionStore};
use serde_json::{json, Value};

/// Spawn a server that serves one connection and returns the base URL plus
/// a channel carrying the captured request text.
fn serve_once(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let (tx, rx) = mpsc::channel();

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        content_type,
        body.len(),
        body
    );

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);
        tx.send(request).ok();
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        stream.flush().ok();
    });

    (format!("http://{}", addr), rx)
}

/// Read one HTTP request: headers plus a Content-Length body, if present.
fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_subslice(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn sample_user() -> UserProfile {
    UserProfile {
        id: 7,
        first_name: "Ana".to_string(),
        last_name: "Silva".to_string(),
        email: "ana@school.test".to_string(),
        role: Role::Teacher,
        institution_id: Some(3),
    }
}

#[tokio::test]
async fn get_without_token_returns_parsed_json() {
    let (base, rx) = serve_once("200 OK", "application/json", r#"[{"id":1,"name":"X"}]"#);
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let body = client.get("/institutions").await.expect("request succeeds");
    let value = match body {
        ResponseBody::Json(value) => value,
        other => panic!("expected JSON body, got {:?}", other),
    };
    assert_eq!(value, json!([{"id": 1, "name": "X"}]));

    let request = rx.recv().expect("captured request").to_lowercase();
    assert!(request.starts_with("get /institutions http/1.1"));
    assert!(!request.contains("authorization:"));
}

#[tokio::test]
async fn json_success_decodes_into_models() {
    let (base, _rx) = serve_once(
        "200 OK",
        "application/json; charset=utf-8",
        r#"[{"id":1,"name":"Escola X","location":"Lisboa"}]"#,
    );
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let institutions: Vec<Institution> = client
        .get("/institutions")
        .await
        .expect("request succeeds")
        .json()
        .expect("decode institutions");
    assert_eq!(institutions.len(), 1);
    assert_eq!(institutions[0].name, "Escola X");
    assert_eq!(institutions[0].location.as_deref(), Some("Lisboa"));
}

#[tokio::test]
async fn non_json_success_returns_raw_text() {
    let (base, _rx) = serve_once("200 OK", "text/plain", "pong");
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let body = client.get("/health").await.expect("request succeeds");
    match body {
        ResponseBody::Text(text) => assert_eq!(text, "pong"),
        other => panic!("expected text body, got {:?}", other),
    }
}

#[tokio::test]
async fn bearer_header_carries_stored_token() {
    let (base, rx) = serve_once("200 OK", "application/json", "{}");
    let store = Arc::new(MemorySessionStore::new());
    store.set_token("abc").expect("seed token");
    let client = ApiClient::new(base, store).expect("build client");

    client.get("/classes").await.expect("request succeeds");

    let request = rx.recv().expect("captured request").to_lowercase();
    assert!(request.contains("authorization: bearer abc"));
    assert!(request.contains("content-type: application/json"));
}

#[tokio::test]
async fn unauthorized_clears_session_and_fails() {
    let (base, rx) = serve_once(
        "401 Unauthorized",
        "application/json",
        r#"{"error":"expired"}"#,
    );
    let store = Arc::new(MemorySessionStore::new());
    store.set_token("abc").expect("seed token");
    store.set_user(&sample_user()).expect("seed user");
    let client = ApiClient::new(base, store.clone()).expect("build client");

    let err = client
        .post("/classes", &json!({"name": "A"}))
        .await
        .expect_err("401 must fail");
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::SessionExpired)
    ));

    // Both entries are gone as soon as the call settles
    assert!(store.token().is_none());
    assert!(store.user().is_none());
    assert!(!store.is_authenticated());

    let request = rx.recv().expect("captured request");
    let lower = request.to_lowercase();
    assert!(lower.contains("authorization: bearer abc"));
    assert!(request.ends_with(r#"{"name":"A"}"#));
}

#[tokio::test]
async fn not_found_is_classified_and_session_untouched() {
    let (base, _rx) = serve_once(
        "404 Not Found",
        "application/json",
        r#"{"error":"no such class"}"#,
    );
    let store = Arc::new(MemorySessionStore::new());
    store.set_token("abc").expect("seed token");
    store.set_user(&sample_user()).expect("seed user");
    let client = ApiClient::new(base, store.clone()).expect("build client");

    let err = client
        .get("/classes/999")
        .await
        .expect_err("404 must fail");
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }

    assert_eq!(store.token().as_deref(), Some("abc"));
    assert!(store.user().is_some());
}

#[tokio::test]
async fn forbidden_is_classified_without_session_mutation() {
    let (base, _rx) = serve_once("403 Forbidden", "application/json", r#"{"error":"role"}"#);
    let store = Arc::new(MemorySessionStore::new());
    store.set_token("abc").expect("seed token");
    let client = ApiClient::new(base, store.clone()).expect("build client");

    let err = client.delete("/classes/1").await.expect_err("403 must fail");
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Forbidden(_))
    ));
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn server_errors_map_to_server_error() {
    let (base, _rx) = serve_once("503 Service Unavailable", "text/plain", "maintenance");
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let err = client.get("/dashboard").await.expect_err("503 must fail");
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::ServerError(_))
    ));
}

#[tokio::test]
async fn other_failure_statuses_keep_their_code() {
    let (base, _rx) = serve_once("418 I'm a teapot", "text/plain", "short and stout");
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let err = client.get("/teapot").await.expect_err("418 must fail");
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::RequestFailed { status: 418, .. }) => {}
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn network_failure_propagates_as_network_error() {
    // Nothing listens here; the connection is refused
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new("http://127.0.0.1:9", store).expect("build client");

    let err = client.get("/anything").await.expect_err("must fail");
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Network(_))
    ));
}

#[tokio::test]
async fn login_persists_token_and_profile() {
    let (base, rx) = serve_once(
        "200 OK",
        "application/json",
        r#"{"token":"jwt-1","id":7,"firstName":"Ana","lastName":"Silva","email":"ana@school.test","role":"TEACHER","institutionId":3}"#,
    );
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store.clone()).expect("build client");

    let user = client
        .login("ana@school.test", "hunter2")
        .await
        .expect("login succeeds");
    assert_eq!(user, sample_user());
    assert_eq!(store.token().as_deref(), Some("jwt-1"));
    assert_eq!(store.user(), Some(user));

    let request = rx.recv().expect("captured request");
    let lower = request.to_lowercase();
    assert!(lower.starts_with("post /api/auth/login http/1.1"));
    // No token yet when logging in
    assert!(!lower.contains("authorization:"));
    assert!(request.contains(r#""email":"ana@school.test""#));
    assert!(request.contains(r#""password":"hunter2""#));
}

#[tokio::test]
async fn register_posts_the_account_payload() {
    let (base, rx) = serve_once("200 OK", "application/json", "{}");
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store.clone()).expect("build client");

    let request = RegisterRequest {
        first_name: "Rui".to_string(),
        last_name: "Costa".to_string(),
        email: "rui@school.test".to_string(),
        password: "secret".to_string(),
        institution_id: 3,
        role: Role::Student,
    };
    client.register(&request).await.expect("register succeeds");

    // Registration does not sign the user in
    assert!(!store.is_authenticated());

    let captured = rx.recv().expect("captured request");
    assert!(captured
        .to_lowercase()
        .starts_with("post /api/auth/register http/1.1"));
    assert!(captured.contains(r#""institutionId":3"#));
    assert!(captured.contains(r#""role":"STUDENT""#));
}

#[tokio::test]
async fn update_profile_writes_through_the_store() {
    let (base, rx) = serve_once("200 OK", "application/json", "{}");
    let store = Arc::new(MemorySessionStore::new());
    store.set_token("abc").expect("seed token");
    store.set_user(&sample_user()).expect("seed user");
    let client = ApiClient::new(base, store.clone()).expect("build client");

    let update = ProfileUpdate {
        first_name: "Ana Maria".to_string(),
        last_name: "Silva".to_string(),
        email: "ana.maria@school.test".to_string(),
    };
    let updated = client
        .update_profile(&update)
        .await
        .expect("update succeeds");

    assert_eq!(updated.first_name, "Ana Maria");
    // Role and id come from the stored profile, untouched
    assert_eq!(updated.role, Role::Teacher);
    assert_eq!(updated.id, 7);
    assert_eq!(store.user(), Some(updated));

    let captured = rx.recv().expect("captured request");
    assert!(captured
        .to_lowercase()
        .starts_with("put /api/auth/profile http/1.1"));
    assert!(captured.contains(r#""email":"ana.maria@school.test""#));
}

#[tokio::test]
async fn delete_can_carry_a_json_body() {
    let (base, rx) = serve_once("200 OK", "application/json", "{}");
    let store = Arc::new(MemorySessionStore::new());
    store.set_token("abc").expect("seed token");
    let client = ApiClient::new(base, store).expect("build client");

    client
        .delete_with_body(
            "/classes/1/students",
            &RosterChange {
                student_ids: vec![5],
            },
        )
        .await
        .expect("delete succeeds");

    let captured = rx.recv().expect("captured request");
    assert!(captured
        .to_lowercase()
        .starts_with("delete /classes/1/students http/1.1"));
    assert!(captured.ends_with(r#"{"studentIds":[5]}"#));
}

#[tokio::test]
async fn header_overrides_win_over_defaults() {
    let (base, rx) = serve_once("200 OK", "application/json", "{}");
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let mut overrides = reqwest::header::HeaderMap::new();
    overrides.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("text/csv"),
    );

    client
        .request(reqwest::Method::GET, "/export", None, Some(overrides))
        .await
        .expect("request succeeds");

    let request = rx.recv().expect("captured request").to_lowercase();
    assert!(request.contains("content-type: text/csv"));
    assert!(!request.contains("content-type: application/json"));
}

#[tokio::test]
async fn empty_json_body_decodes_as_null() {
    let (base, _rx) = serve_once("200 OK", "application/json", "");
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base, store).expect("build client");

    let body = client.delete("/materials/5").await.expect("request succeeds");
    match body {
        ResponseBody::Json(value) => assert_eq!(value, Value::Null),
        other => panic!("expected JSON body, got {:?}", other),
    }
}
