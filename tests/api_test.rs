use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use roster::api::router;
use roster::build_state;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup_app() -> Router {
    let state = build_state("sqlite::memory:")
        .await
        .expect("Failed to build state");
    router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body was not JSON")
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_edit_delete_flow() {
    let app = setup_app().await;

    let (_, view) = send(&app, "GET", "/roster", None).await;
    assert_eq!(view["students"].as_array().map(Vec::len), Some(0));
    assert_eq!(view["draft"]["mode"]["kind"], "creating");

    let ana = json!({
        "name": "Ana",
        "lastName": "Lopez",
        "address": "Main St",
        "telephone": "555-0100"
    });
    let (status, view) = send(&app, "PUT", "/draft", Some(ana)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["draft"]["fields"]["lastName"], "Lopez");

    let (_, view) = send(&app, "POST", "/draft/submit", None).await;
    assert_eq!(view["outcome"], "applied");
    assert_eq!(view["notifications"][0]["message"], "Student inserted correctly");
    assert_eq!(view["notifications"][0]["severity"], "brief");
    assert_eq!(view["draft"]["fields"]["name"], "");
    let id = view["students"][0]["id"].as_i64().expect("id should be an integer");

    let (status, view) = send(&app, "POST", &format!("/draft/edit/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["draft"]["mode"]["kind"], "editing");
    assert_eq!(view["draft"]["mode"]["id"], id);

    let moved = json!({
        "name": "Ana",
        "lastName": "Lopez",
        "address": "2nd St",
        "telephone": "555-0100"
    });
    send(&app, "PUT", "/draft", Some(moved)).await;
    let (_, view) = send(&app, "POST", "/draft/submit", None).await;
    assert_eq!(view["outcome"], "applied");
    assert_eq!(view["students"].as_array().map(Vec::len), Some(1));
    assert_eq!(view["students"][0]["address"], "2nd St");

    let (status, student) = send(&app, "GET", &format!("/students/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(student["address"], "2nd St");

    let (_, view) = send(&app, "DELETE", &format!("/students/{}", id), None).await;
    assert_eq!(view["outcome"], "applied");
    assert_eq!(view["students"].as_array().map(Vec::len), Some(0));

    let (_, view) = send(&app, "DELETE", &format!("/students/{}", id), None).await;
    assert_eq!(view["outcome"], "no_rows_affected");
    assert_eq!(view["notifications"][0]["message"], "Student was not eliminated");
    assert_eq!(view["notifications"][0]["severity"], "persistent");
}

#[tokio::test]
async fn test_missing_student_is_not_found() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/students/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/draft/edit/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_reset_draft_discards_edits() {
    let app = setup_app().await;
    send(&app, "PUT", "/draft", Some(json!({ "name": "Ana" }))).await;

    let (_, view) = send(&app, "DELETE", "/draft", None).await;
    assert_eq!(view["draft"]["fields"]["name"], "");
    assert_eq!(view["draft"]["mode"]["kind"], "creating");

    let (_, view) = send(&app, "POST", "/roster/reload", None).await;
    assert_eq!(view["students"].as_array().map(Vec::len), Some(0));
}
