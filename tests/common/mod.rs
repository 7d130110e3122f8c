#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tempfile::TempDir;
use trip_planner::submission::REQUEST_ID_HEADER;

/// Request id header and JSON body of every request the server received.
pub type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: Value,
    seen: Seen,
}

async fn trip_requests(
    State(reply): State<Reply>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    reply.seen.lock().unwrap().push((request_id, payload));
    (reply.status, Json(reply.body))
}

/// Starts a booking endpoint answering `POST /api/trip-requests` with a fixed
/// reply. Returns its base URL.
pub fn spawn_booking_server(status: StatusCode, body: Value) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let reply = Reply {
        status,
        body,
        seen: Arc::clone(&seen),
    };
    let (tx, rx) = mpsc::channel::<SocketAddr>();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind test listener");
            tx.send(listener.local_addr().expect("listener address"))
                .expect("report server address");
            let app = Router::new()
                .route("/api/trip-requests", post(trip_requests))
                .with_state(reply);
            axum::serve(listener, app).await.expect("serve booking endpoint");
        });
    });

    let addr = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("server started");
    (format!("http://{addr}"), seen)
}

/// Base URL on which nothing is listening.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind a free port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Fresh data directory for `TRIP_PLANNER_HOME`.
pub fn isolated_home() -> TempDir {
    TempDir::new().expect("create temp home")
}
