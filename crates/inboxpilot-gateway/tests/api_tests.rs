// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use inboxpilot_ai::EchoProvider;
use inboxpilot_app::AppContext;
use inboxpilot_config::InboxConfig;
use inboxpilot_config::model::StorageConfig;
use inboxpilot_core::{AiProvider, InboxStore};
use inboxpilot_gateway::{GatewayState, router};
use inboxpilot_storage::SqliteStore;
use inboxpilot_test_utils::MockProvider;
use serde_json::{Value, json};
use tower::ServiceExt;

const MESSAGES: &str = r#"[
    {"provider_message_id": "fx-1", "subject": "Urgent: contract", "sender": "legal@example.com",
     "recipients": "me@example.com", "timestamp": "2026-03-02T09:00:00",
     "snippet": "Please sign", "body": "Please sign the contract asap"},
    {"provider_message_id": "fx-2", "subject": "Lunch", "sender": "friend@example.com",
     "recipients": "me@example.com", "timestamp": "2026-03-01T12:00:00",
     "snippet": "Lunch?", "body": "Lunch on Friday?"}
]"#;

const MEETINGS: &str = r#"[
    {"provider_event_id": "ev-1", "title": "Quarterly review", "participants": "a@example.com",
     "start_time": "2026-03-03T10:00:00", "end_time": "2026-03-03T11:00:00"}
]"#;

struct TestApi {
    app: Router,
    context: AppContext,
    dir: tempfile::TempDir,
}

async fn api_with(config: InboxConfig, provider: Arc<dyn AiProvider>) -> TestApi {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(StorageConfig {
        database_path: dir.path().join("api.db").to_string_lossy().into_owned(),
        wal_mode: true,
    });
    store.initialize().await.unwrap();
    std::fs::write(dir.path().join("messages.json"), MESSAGES).unwrap();
    std::fs::write(dir.path().join("meetings.json"), MEETINGS).unwrap();
    let context = AppContext::from_parts(config, Arc::new(store), provider)
        .await
        .unwrap();
    TestApi {
        app: router(GatewayState::from_app(context.clone())),
        context,
        dir,
    }
}

async fn api() -> TestApi {
    api_with(InboxConfig::default(), Arc::new(EchoProvider::new())).await
}

impl TestApi {
    fn fixture(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn ingest_messages(&self) {
        let (status, body) = self
            .post(
                "/ingest/mock",
                json!({ "limit": 10, "fixture_path": self.fixture("messages.json") }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["ingested"], 2);
    }

    async fn first_message_id(&self) -> i64 {
        let (_, body) = self.get("/messages?limit=10").await;
        body.as_array()
            .unwrap()
            .iter()
            .find(|m| m["provider_message_id"] == "fx-1")
            .unwrap()["id"]
            .as_i64()
            .unwrap()
    }
}

// ---- Test 1: health is public ----

#[tokio::test]
async fn health_is_public_even_with_static_key() {
    let mut config = InboxConfig::default();
    config.gateway.api_key = Some("static-key".into());
    let api = api_with(config, Arc::new(EchoProvider::new())).await;

    let (status, body) = api.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, _) = api.get("/messages").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ---- Test 2: static key and per-user keys ----

#[tokio::test]
async fn static_key_maps_to_default_user() {
    let mut config = InboxConfig::default();
    config.gateway.api_key = Some("static-key".into());
    let api = api_with(config, Arc::new(EchoProvider::new())).await;

    let ok = api
        .send(
            Request::get("/stats")
                .header("x-api-key", "static-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(ok.0, StatusCode::OK);

    let bad = api
        .send(
            Request::get("/stats")
                .header("x-api-key", "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(bad.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn per_user_key_scopes_requests_to_its_user() {
    let api = api().await;
    api.ingest_messages().await;

    let other = api.context.user_id_for_email("second@example.com").await.unwrap();
    let key = api.context.api_keys().create(other, Some("test")).await.unwrap();

    let (status, body) = api
        .send(
            Request::get("/messages")
                .header("x-api-key", key.token.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, mine) = api.get("/messages").await;
    assert_eq!(mine.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_key_is_rejected_in_local_first_mode() {
    let api = api().await;
    let (status, _) = api
        .send(
            Request::get("/messages")
                .header("x-api-key", "nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_key_lifecycle_over_http() {
    let api = api().await;

    let (status, created) = api.post("/api-keys", json!({ "label": "laptop" })).await;
    assert_eq!(status, StatusCode::OK);
    let token = created["token"].as_str().unwrap().to_string();
    let id = created["id"].as_i64().unwrap();

    let (_, listed) = api.get("/api-keys").await;
    assert_eq!(listed[0]["label"], "laptop");
    assert!(listed[0].get("token_hash").is_none());

    let (status, _) = api
        .send(
            Request::delete(format!("/api-keys/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = api
        .send(
            Request::get("/stats")
                .header("x-api-key", token.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = api
        .send(
            Request::delete(format!("/api-keys/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---- Test 3: error mapping ----

#[tokio::test]
async fn missing_message_is_404_with_error_body() {
    let api = api().await;
    let (status, body) = api.get("/messages/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn unknown_template_is_400() {
    let api = api().await;
    let (status, body) = api
        .post("/templates/load", json!({ "template_name": "astronomy" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_fixture_is_400() {
    let api = api().await;
    let (status, _) = api
        .post(
            "/ingest/mock",
            json!({ "fixture_path": api.fixture("nope.json") }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_failure_is_502() {
    let api = api_with(InboxConfig::default(), Arc::new(MockProvider::failing())).await;
    api.ingest_messages().await;
    let id = api.first_message_id().await;

    let (status, body) = api.post("/messages/summary", json!({ "message_id": id })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());

    let (_, requests) = api.get("/ai/requests").await;
    let (_, responses) = api.get("/ai/responses").await;
    assert_eq!(requests.as_array().unwrap().len(), 1);
    assert!(responses.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn bad_parent_type_is_400() {
    let api = api().await;
    let (status, _) = api.get("/notes?parent_type=calendar&parent_id=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---- Test 4: organization flow ----

#[tokio::test]
async fn categories_templates_and_suggestions() {
    let api = api().await;
    api.ingest_messages().await;
    let id = api.first_message_id().await;

    let (_, templates) = api.get("/templates").await;
    assert_eq!(templates.as_array().unwrap().len(), 5);

    let (status, created) = api
        .post("/categories", json!({ "name": "Legal", "description": "contract review" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let category_id = created["id"].as_i64().unwrap();

    let (status, suggestion) = api
        .post("/categories/suggest", json!({ "message_id": id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(suggestion["source"], "rules");
    assert_eq!(suggestion["categories"][0]["name"], "Legal");

    let (status, _) = api
        .post(
            "/categories/assign",
            json!({ "message_id": id, "category_id": category_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = api
        .post(
            "/categories/assign",
            json!({ "message_id": id, "category_id": 4242 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn suggestions_report_ai_source_when_model_names_a_category() {
    let provider = Arc::new(MockProvider::with_responses(vec!["- legal".into()]));
    let api = api_with(InboxConfig::default(), provider).await;
    api.ingest_messages().await;
    let id = api.first_message_id().await;
    api.post("/categories", json!({ "name": "Legal" })).await;
    api.post("/categories", json!({ "name": "Personal" })).await;

    let (_, suggestion) = api
        .post("/categories/suggest", json!({ "message_id": id }))
        .await;
    assert_eq!(suggestion["source"], "ai");
    assert_eq!(suggestion["categories"].as_array().unwrap().len(), 1);
    assert_eq!(suggestion["categories"][0]["name"], "Legal");
}

// ---- Test 5: tasks, notes, meetings ----

#[tokio::test]
async fn tasks_notes_and_triage() {
    let api = api().await;
    api.ingest_messages().await;
    let id = api.first_message_id().await;

    let (status, task) = api
        .post(
            "/tasks",
            json!({ "parent_type": "message", "parent_id": id, "description": "Sign" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let task_id = task["id"].as_i64().unwrap();

    let (status, _) = api
        .post("/tasks/update", json!({ "task_id": task_id, "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, tasks) = api
        .get(&format!("/tasks?parent_type=message&parent_id={id}"))
        .await;
    assert_eq!(tasks[0]["status"], "done");

    let (status, _) = api
        .post(
            "/notes",
            json!({ "parent_type": "message", "parent_id": id, "content": "Call legal" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, notes) = api
        .get(&format!("/notes?parent_type=message&parent_id={id}"))
        .await;
    assert_eq!(notes[0]["content"], "Call legal");

    let (_, triage) = api.get("/triage").await;
    let items = triage.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let urgent = items.iter().find(|i| i["id"] == id).unwrap();
    assert_eq!(urgent["priority"], "high");

    let (_, stats) = api.get("/stats").await;
    assert_eq!(stats["messages"], 2);
    assert_eq!(stats["tasks"], 1);
    assert_eq!(stats["notes"], 1);
}

#[tokio::test]
async fn meeting_transcript_summary_and_extraction() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "Reviewed the quarter.".into(),
        "- Send slides\n- Book follow-up".into(),
    ]));
    let api = api_with(InboxConfig::default(), provider).await;

    let (status, body) = api
        .post(
            "/ingest/calendar-mock",
            json!({ "fixture_path": api.fixture("meetings.json") }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingested"], 1);

    let (_, meetings) = api.get("/meetings?query=quarterly").await;
    let meeting_id = meetings[0]["id"].as_i64().unwrap();

    let (status, _) = api
        .post("/meetings/summary", json!({ "meeting_id": meeting_id }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api
        .post(
            "/meetings/transcript",
            json!({ "meeting_id": meeting_id, "content": "We reviewed numbers." }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, summary) = api
        .post("/meetings/summary", json!({ "meeting_id": meeting_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(summary["note_id"].is_i64());

    let (_, extracted) = api
        .post("/tasks/extract-meeting", json!({ "meeting_id": meeting_id }))
        .await;
    assert_eq!(extracted["created"], 2);
}

// ---- Test 6: chat and drafting ----

#[tokio::test]
async fn chat_and_draft_return_text() {
    let api = api().await;
    api.ingest_messages().await;
    let id = api.first_message_id().await;

    let (status, chat) = api.post("/chat", json!({ "query": "contract" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(chat["answer"].as_str().unwrap().starts_with("[mock:answer]"));

    let (status, draft) = api
        .post(
            "/draft",
            json!({ "message_id": id, "instructions": "Say yes" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(draft["draft"].as_str().unwrap().starts_with("[mock:draft]"));

    let (status, _) = api.post("/chat", json!({ "query": "x", "limit": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn connections_round_trip() {
    let api = api().await;
    let (status, _) = api
        .post(
            "/connections",
            json!({ "provider_type": "email", "provider_name": "imap", "status": "connected" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, connections) = api.get("/connections").await;
    assert_eq!(connections[0]["provider_name"], "imap");
}
