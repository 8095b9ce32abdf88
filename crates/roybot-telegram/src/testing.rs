//! Fakes shared by the unit tests: the remote services and the Bot API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::{Json, Router};
use roybot_client::{Environment, JobSubmission, Result, Tenant, TranscodeStatus, TranscoderApi};
use serde_json::{json, Value};
use teloxide::types::{Me, Message, Update};
use teloxide::Bot;
use tokio::sync::{mpsc, Notify};

/// Fake services answering from canned values and recording calls.
#[derive(Default)]
pub struct FakeApi {
    pub unhealthy: bool,
    pub panic_on_health: bool,
    /// Hold the health check until notified.
    pub gate: Option<Arc<Notify>>,
    pub status: TranscodeStatus,
    pub tenants: Vec<Tenant>,
    pub job_body: String,
    pub calls: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<JobSubmission>>,
}

impl FakeApi {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscoderApi for FakeApi {
    async fn health_check(&self) -> Result<bool> {
        self.record("health_check");
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.panic_on_health {
            panic!("health check exploded");
        }
        Ok(!self.unhealthy)
    }

    async fn query_status(&self) -> Result<TranscodeStatus> {
        self.record("query_status");
        Ok(self.status.clone())
    }

    async fn list_tenants(&self, environment: Environment) -> Result<Vec<Tenant>> {
        self.record(&format!("list_tenants:{}", environment));
        Ok(self.tenants.clone())
    }

    async fn submit_job(&self, job: &JobSubmission) -> Result<bool> {
        self.record("submit_job");
        self.submitted.lock().unwrap().push(job.clone());
        Ok(false)
    }

    async fn query_job(&self, tenant: &str, id: &str, media_type: &str) -> Result<String> {
        self.record(&format!("query_job:{}/{}/{}", tenant, id, media_type));
        Ok(self.job_body.clone())
    }
}

pub const CHAT_ID: i64 = 42;

fn chat() -> Value {
    json!({
        "id": CHAT_ID,
        "type": "private",
        "username": "ops",
        "first_name": "Ops"
    })
}

fn message_json(text: &str) -> Value {
    json!({
        "message_id": 1,
        "date": 1_700_000_000,
        "chat": chat(),
        "from": {"id": CHAT_ID, "is_bot": false, "first_name": "Ops", "username": "ops"},
        "text": text
    })
}

/// A private-chat text message from `@ops`.
pub fn message(text: &str) -> Message {
    serde_json::from_value(message_json(text)).unwrap()
}

/// An update carrying [`message`].
pub fn update(text: &str) -> Update {
    // teloxide's `UpdateKind` needs borrowed keys, which `from_value` can't provide.
    let raw = json!({"update_id": 1, "message": message_json(text)}).to_string();
    serde_json::from_str(&raw).unwrap()
}

/// The bot's own account, as `getMe` reports it.
pub fn me() -> Me {
    serde_json::from_value(json!({
        "id": 7,
        "is_bot": true,
        "first_name": "Roy",
        "username": "roybot",
        "can_join_groups": false,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }))
    .unwrap()
}

/// Answer every Bot API call with a sent message and forward the request body.
async fn record(
    State(requests): State<mpsc::UnboundedSender<Value>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let text = body["text"].clone();
    let _ = requests.send(body);
    Json(json!({
        "ok": true,
        "result": {
            "message_id": 2,
            "date": 1_700_000_001,
            "chat": chat(),
            "text": text
        }
    }))
}

/// A bot whose API calls land on a local fake; returns the request bodies it receives.
pub async fn fake_telegram() -> (Bot, mpsc::UnboundedReceiver<Value>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().fallback(record).with_state(tx);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = url::Url::parse(&format!("http://{}", addr)).unwrap();
    (Bot::new("123:test").set_api_url(url), rx)
}
