use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{Days, Local};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use vaxkeeper::db::{RegistryStorage, connect};
use vaxkeeper::router::{KeeperState, keeper_router};
use vaxkeeper::service::LogNotifier;

struct TestApp {
    app: Router,
    storage: RegistryStorage,
    path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "vaxkeeper-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let pool = connect(&database_url, 1).await.expect("open sqlite file");
    let storage = RegistryStorage::new(pool);
    storage.init_schema().await.expect("init schema");

    let state = KeeperState::new(storage.clone(), Arc::new(LogNotifier));
    TestApp {
        app: keeper_router(state),
        storage,
        path,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn seed_family(app: &Router) {
    let (status, body) = send(
        app,
        "POST",
        "/register_parent",
        Some(json!({"name": "A", "email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Parent registered successfully"}));

    let (status, body) = send(
        app,
        "POST",
        "/add_child",
        Some(json!({"name": "Kid1", "dob": "2020-01-01", "parent_email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Child added successfully"}));
}

#[tokio::test]
async fn register_add_schedule_then_list() {
    let t = spawn_app("scenario").await;
    seed_family(&t.app).await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/schedule_appointment",
        Some(json!({"child_name": "Kid1", "vaccine": "MMR", "date": "2099-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Appointment scheduled successfully"}));

    let (status, body) = send(&t.app, "GET", "/get_appointments?child_name=Kid1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"vaccine": "MMR", "date": "2099-01-01"}]));
}

#[tokio::test]
async fn unknown_references_return_404() {
    let t = spawn_app("notfound").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/add_child",
        Some(json!({"name": "Kid1", "dob": "2020-01-01", "parent_email": "none@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Parent not found"}));

    let (status, body) = send(
        &t.app,
        "POST",
        "/schedule_appointment",
        Some(json!({"child_name": "Ghost", "vaccine": "MMR", "date": "2099-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Child not found"}));

    let (status, body) = send(&t.app, "GET", "/get_appointments?child_name=Ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Child not found"}));

    let (status, body) = send(&t.app, "GET", "/get_appointments", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Child not found"}));
}

#[tokio::test]
async fn child_without_appointments_lists_empty_array() {
    let t = spawn_app("empty").await;
    seed_family(&t.app).await;

    let (status, body) = send(&t.app, "GET", "/get_appointments?child_name=Kid1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let t = spawn_app("dup").await;
    seed_family(&t.app).await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/register_parent",
        Some(json!({"name": "Other", "email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"message": "Parent email already registered"}));
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let t = spawn_app("baddate").await;
    seed_family(&t.app).await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/schedule_appointment",
        Some(json!({"child_name": "Kid1", "vaccine": "MMR", "date": "next tuesday"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.contains("next tuesday"))
    );

    let (_, body) = send(&t.app, "GET", "/get_appointments?child_name=Kid1", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn send_reminders_flags_tomorrow_only() {
    let t = spawn_app("sweep").await;
    seed_family(&t.app).await;

    let today = Local::now().date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).expect("tomorrow");
    let next_week = today.checked_add_days(Days::new(7)).expect("next week");

    for (vaccine, date) in [("MMR", tomorrow), ("Polio", next_week)] {
        let (status, _) = send(
            &t.app,
            "POST",
            "/schedule_appointment",
            Some(json!({
                "child_name": "Kid1",
                "vaccine": vaccine,
                "date": date.format("%Y-%m-%d").to_string(),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&t.app, "POST", "/send_reminders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Reminders sent successfully"}));

    let child = t
        .storage
        .find_child_by_name("Kid1")
        .await
        .expect("query child")
        .expect("child exists");
    let appts = t
        .storage
        .list_appointments_for_child(child.id)
        .await
        .expect("list appointments");
    assert_eq!(appts.len(), 2);
    assert!(appts[0].reminder_sent);
    assert!(!appts[1].reminder_sent);

    // second trigger is a no-op but still succeeds
    let (status, _) = send(&t.app, "POST", "/send_reminders", None).await;
    assert_eq!(status, StatusCode::OK);
}
