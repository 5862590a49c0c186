use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use cardledger_api::{router, AppState};
use cardledger_infra::DbManager;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    #[allow(dead_code)]
    temp_dir: TempDir,
    app: Router,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db = DbManager::new(temp_dir.path().join("http.db"), 4).unwrap();
        db.run_migrations().unwrap();

        Self { app: router(AppState::new(Arc::new(db))), temp_dir }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = match body {
            Some(raw) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(raw.to_owned()))
                .unwrap(),
            None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
        };

        let (status, _, value) = self.send_request(request).await;
        (status, value)
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let resp = self.app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, headers, value)
    }

    async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(method, uri, Some(&body.to_string())).await
    }

    async fn create(&self, body: Value) -> Value {
        let (status, card) = self.send_json("POST", "/api/cards", body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {card}");
        card
    }
}

fn field_names(body: &Value) -> Vec<String> {
    body["fields"]
        .as_array()
        .expect("validation body lists fields")
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_root_lists_endpoints() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!(body["endpoints"]["GET /api/stats"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_database_ok() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["connections"]["max"], 4);
    assert!(body["connections"]["open"].as_u64().unwrap() >= 1);
    assert!(body["pool"]["connectionsAcquired"].as_u64().unwrap() >= 1);
    assert_eq!(body["pool"]["connectionsTimeout"], 0);
    assert_eq!(body["pool"]["queriesFailed"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cors_preflight_is_answered() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/cards")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = app.send_request(request).await;

    assert!(status.is_success(), "preflight answered with {status}");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST") || methods == "*", "allowed methods: {methods}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cross_origin_get_carries_allow_origin() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("GET")
        .uri("/api/stats")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = app.send_request(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body, json!({ "total": 0, "sent": 0, "remaining": 0 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_then_get_round_trips_card() {
    let app = TestApp::new();

    let created = app
        .create(json!({
            "recipientName": "  Ada Lovelace ",
            "address": "12 St James's Square, London",
            "email": "ADA@Example.com",
            "notes": "first card"
        }))
        .await;

    assert_eq!(created["recipientName"], "Ada Lovelace");
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["cardSent"], false);
    assert_eq!(created["phoneNumber"], Value::Null);
    assert_eq!(created["dateSent"], Value::Null);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app.send("GET", &format!("/api/cards/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_reports_every_invalid_field() {
    let app = TestApp::new();

    let (status, body) =
        app.send_json("POST", "/api/cards", json!({ "recipientName": "", "cardSent": "yes" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    let fields = field_names(&body);
    for expected in ["recipientName", "address", "cardSent"] {
        assert!(fields.iter().any(|f| f == expected), "missing {expected} in {fields:?}");
    }

    let (_, cards) = app.send("GET", "/api/cards", None).await;
    assert_eq!(cards, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_json_is_payload_error() {
    let app = TestApp::new();

    let (status, body) = app.send("POST", "/api/cards", Some("{ not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["_payload".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_form_encoded_body_is_payload_error() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/cards")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("recipientName=Ada&address=London"))
        .unwrap();

    let (status, _, body) = app.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["_payload".to_string()]);
    let (_, cards) = app.send("GET", "/api/cards", None).await;
    assert_eq!(cards, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_calendar_date_sent_is_midnight_utc() {
    let app = TestApp::new();

    let card = app
        .create(json!({ "recipientName": "Ada", "address": "London", "dateSent": "2024-12-20" }))
        .await;

    assert_eq!(card["dateSent"], "2024-12-20T00:00:00.000Z");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_object_body_is_payload_error() {
    let app = TestApp::new();

    let (status, body) = app.send_json("POST", "/api/cards", json!(["a", "b"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["_payload".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_id_is_404_on_every_route() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/api/cards/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Card not found" }));

    let (status, _) =
        app.send_json("PUT", "/api/cards/missing", json!({ "cardSent": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", "/api/cards/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_merges_and_stats_follow() {
    let app = TestApp::new();
    let first = app.create(json!({ "recipientName": "Ada", "address": "London" })).await;
    app.create(json!({ "recipientName": "Alan", "address": "Wilmslow", "cardSent": true }))
        .await;
    let id = first["id"].as_str().unwrap();

    let (status, stats) = app.send("GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "total": 2, "sent": 1, "remaining": 1 }));

    let (status, updated) = app
        .send_json(
            "PUT",
            &format!("/api/cards/{id}"),
            json!({ "cardSent": true, "dateSent": "2024-12-20T09:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["cardSent"], true);
    assert_eq!(updated["recipientName"], "Ada");
    assert_eq!(updated["createdAt"], first["createdAt"]);
    assert!(updated["dateSent"].as_str().unwrap().starts_with("2024-12-20T09:00:00"));

    let (status, patched) =
        app.send_json("PATCH", &format!("/api/cards/{id}"), json!({ "notes": "posted" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["notes"], "posted");
    assert_eq!(patched["cardSent"], true);

    let (_, stats) = app.send("GET", "/api/cards/stats", None).await;
    assert_eq!(stats, json!({ "total": 2, "sent": 2, "remaining": 0 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_update_leaves_card_unchanged() {
    let app = TestApp::new();
    let card = app.create(json!({ "recipientName": "Grace", "address": "Arlington" })).await;
    let uri = format!("/api/cards/{}", card["id"].as_str().unwrap());

    let (status, body) = app.send_json("PUT", &uri, json!({ "address": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["address".to_string()]);

    let (_, fetched) = app.send("GET", &uri, None).await;
    assert_eq!(fetched, card);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_returns_card_and_removes_it() {
    let app = TestApp::new();
    let card = app.create(json!({ "recipientName": "Hedy", "address": "Vienna" })).await;
    let uri = format!("/api/cards/{}", card["id"].as_str().unwrap());

    let (status, body) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Card deleted successfully");
    assert_eq!(body["card"], card);

    let (status, _) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = app.send("GET", "/api/stats", None).await;
    assert_eq!(stats, json!({ "total": 0, "sent": 0, "remaining": 0 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_returns_newest_first() {
    let app = TestApp::new();
    for name in ["One", "Two", "Three"] {
        app.create(json!({ "recipientName": name, "address": "Somewhere" })).await;
    }

    let (status, cards) = app.send("GET", "/api/cards", None).await;

    assert_eq!(status, StatusCode::OK);
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 3);
    for pair in cards.windows(2) {
        let newer = pair[0]["createdAt"].as_str().unwrap();
        let older = pair[1]["createdAt"].as_str().unwrap();
        assert!(newer >= older, "{newer} should not precede {older}");
    }
}
