//! End-to-end command scenarios against in-process fake services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use roybot_client::{Endpoints, HttpTranscoderClient};
use roybot_telegram::handlers::{NOTHING_PROCESSING, UNREACHABLE};
use roybot_telegram::{handle_command, Command};
use serde_json::json;

/// Transcoder and tenant directory on one local server.
struct Services {
    healthy: bool,
    status_body: String,
    remote_calls: AtomicUsize,
}

async fn start(services: Services) -> (HttpTranscoderClient, Arc<Services>) {
    let services = Arc::new(services);

    let app = Router::new()
        .route(
            "/ping",
            get(|State(s): State<Arc<Services>>| async move {
                if s.healthy {
                    StatusCode::OK
                } else {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            }),
        )
        .route(
            "/transcode/process",
            get(|State(s): State<Arc<Services>>| async move {
                s.remote_calls.fetch_add(1, Ordering::SeqCst);
                s.status_body.clone()
            }),
        )
        .route(
            "/release/v1/tenants",
            get(|State(s): State<Arc<Services>>| async move {
                s.remote_calls.fetch_add(1, Ordering::SeqCst);
                json!({
                    "results": [
                        {"hostname": "globex.example.com", "schema": "globex"},
                        {"hostname": "acme.example.com", "schema": "acme"},
                    ]
                })
                .to_string()
            }),
        )
        .with_state(Arc::clone(&services));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoints = Endpoints::local(&format!("http://{}", addr)).unwrap();
    (HttpTranscoderClient::new(endpoints), services)
}

#[tokio::test]
async fn test_unhealthy_service_short_circuits() {
    let (client, services) = start(Services {
        healthy: false,
        status_body: "{}".into(),
        remote_calls: AtomicUsize::new(0),
    })
    .await;

    for command in [Command::TranscoderStatus, Command::ApiTenants] {
        let reply = handle_command(&client, &command, Some("ops")).await;
        assert_eq!(reply.text, format!("@ops {}", UNREACHABLE));
    }
    assert_eq!(services.remote_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_status_when_idle() {
    let (client, _) = start(Services {
        healthy: true,
        status_body: json!({"queue_size": 0, "video": {}}).to_string(),
        remote_calls: AtomicUsize::new(0),
    })
    .await;

    let reply = handle_command(&client, &Command::TranscoderStatus, None).await;
    assert_eq!(reply.text, NOTHING_PROCESSING);
}

#[tokio::test]
async fn test_status_resolves_owner_hostname() {
    let status = json!({
        "queue_size": 3,
        "video": {
            "id": "42",
            "tenant": "acme",
            "filename": "clip.mp4",
            "file": "acme/contents/videos/42/clip.mp4",
            "type": "mp4",
            "environment": "release"
        }
    });
    let (client, services) = start(Services {
        healthy: true,
        status_body: status.to_string(),
        remote_calls: AtomicUsize::new(0),
    })
    .await;

    let reply = handle_command(&client, &Command::TranscoderStatus, None).await;
    assert!(reply.text.contains("The queue size is 3."));
    assert!(reply.text.contains("clip.mp4"));
    assert!(reply.text.contains("id: 42"));
    assert!(reply.text.contains("for: acme.example.com"));
    assert_eq!(services.remote_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_broken_status_body_is_reported() {
    let (client, _) = start(Services {
        healthy: true,
        status_body: "not json".into(),
        remote_calls: AtomicUsize::new(0),
    })
    .await;

    let reply = handle_command(&client, &Command::TranscoderStatus, None).await;
    assert!(reply.text.starts_with("Something went wrong talking to the transcoder"));
}
