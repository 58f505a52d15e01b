//! Integration tests for loading the user roster over HTTP.
//!
//! An in-process axum server on an ephemeral port stands in for the
//! roster endpoint.
//!
//! Verification command: `cargo test --test roster_http`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use url::Url;

use taskboard::roster::{
    HttpRosterSource, ROSTER_ERROR_MESSAGE, RosterError, RosterSource, load_roster,
};
use taskboard::session::Session;
use taskboard::storage::{InMemoryStorage, TaskPersistence};
use taskboard::store::{RosterStatus, Snapshot, Store};

const USERS_BODY: &str = r#"[
    {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
     "address": {"city": "Gwenborough"}},
    {"id": 2, "name": "Ervin Howell", "username": "Antonette"}
]"#;

// =============================================================================
// Test helpers
// =============================================================================

/// Starts a fake roster server and returns its bound address.
async fn start_roster_server() -> SocketAddr {
    let app = Router::new()
        .route("/users", get(|| async { USERS_BODY }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbage", get(|| async { "<html>not a roster</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                USERS_BODY
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn source(addr: SocketAddr, path: &str) -> HttpRosterSource {
    let url = Url::parse(&format!("http://{addr}{path}")).unwrap();
    HttpRosterSource::new(url, Duration::from_secs(2)).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn fetches_and_decodes_users() {
    let addr = start_roster_server().await;
    let users = source(addr, "/users").fetch().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Leanne Graham");
    assert_eq!(users[0].email.as_deref(), Some("Sincere@april.biz"));
    assert_eq!(users[1].email, None);
}

#[tokio::test]
async fn successful_load_publishes_users_and_ready() {
    let addr = start_roster_server().await;
    let store = Store::new(Snapshot::default());

    load_roster(&store, &source(addr, "/users")).await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.roster, RosterStatus::Ready);
    assert_eq!(snapshot.users.len(), 2);
}

#[tokio::test]
async fn server_error_is_reported_as_status() {
    let addr = start_roster_server().await;
    let err = source(addr, "/broken").fetch().await.unwrap_err();
    assert!(matches!(err, RosterError::Status(500)), "got {err:?}");

    let err = source(addr, "/missing").fetch().await.unwrap_err();
    assert!(matches!(err, RosterError::Status(404)), "got {err:?}");
}

#[tokio::test]
async fn failed_load_leaves_users_empty() {
    let addr = start_roster_server().await;

    for path in ["/broken", "/missing", "/garbage"] {
        let store = Store::new(Snapshot::default());
        load_roster(&store, &source(addr, path)).await;

        let snapshot = store.snapshot();
        assert!(snapshot.users.is_empty(), "{path}");
        assert_eq!(
            snapshot.roster,
            RosterStatus::Failed(ROSTER_ERROR_MESSAGE.to_string()),
            "{path}"
        );
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let addr = start_roster_server().await;
    let err = source(addr, "/garbage").fetch().await.unwrap_err();
    assert!(matches!(err, RosterError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn request_timeout_is_a_transport_error() {
    let addr = start_roster_server().await;
    let url = Url::parse(&format!("http://{addr}/slow")).unwrap();
    let slow = HttpRosterSource::new(url, Duration::from_millis(200)).unwrap();

    let err = slow.fetch().await.unwrap_err();
    assert!(matches!(err, RosterError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_fails_the_roster() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Store::new(Snapshot::default());
    load_roster(&store, &source(addr, "/users")).await;
    assert!(matches!(store.snapshot().roster, RosterStatus::Failed(_)));
}

#[tokio::test]
async fn session_loads_roster_in_background() {
    let addr = start_roster_server().await;
    let persistence = TaskPersistence::new(Box::new(InMemoryStorage::new()), "tasks");

    let mut session = Session::start(persistence, source(addr, "/users"));
    session.wait_for_roster().await;

    assert!(session.roster_settled());
    let snapshot = session.store().snapshot();
    assert_eq!(snapshot.roster, RosterStatus::Ready);
    assert_eq!(snapshot.users[1].name, "Ervin Howell");
}
