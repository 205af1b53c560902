//! Local stand-in for the OMDb endpoint.
//!
//! Answers `GET /?...` from a queue of scripted bodies and records the
//! query string of every request.

#![allow(dead_code)]

use axum::extract::{RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }
}

#[derive(Default)]
struct Script {
    queue: VecDeque<MockResponse>,
    seen: Vec<String>,
}

type Shared = Arc<Mutex<Script>>;

pub struct MockOmdb {
    pub addr: SocketAddr,
    script: Shared,
    shutdown: watch::Sender<bool>,
}

impl MockOmdb {
    pub async fn start() -> Self {
        let script: Shared = Arc::default();
        let app = Router::new()
            .route("/", get(answer))
            .with_state(script.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        let (shutdown, mut stop) = watch::channel(false);
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            script,
            shutdown,
        }
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.script.lock().queue.push_back(response);
    }

    /// Query strings exactly as they arrived on the wire.
    pub fn raw_queries(&self) -> Vec<String> {
        self.script.lock().seen.clone()
    }

    /// Decoded query parameters of every request so far.
    pub fn captured(&self) -> Vec<HashMap<String, String>> {
        self.raw_queries()
            .iter()
            .map(|raw| decode_query(raw))
            .collect()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for MockOmdb {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

fn decode_query(raw: &str) -> HashMap<String, String> {
    reqwest::Url::parse(&format!("http://mock/?{}", raw))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

async fn answer(State(script): State<Shared>, RawQuery(query): RawQuery) -> Response {
    let next = {
        let mut script = script.lock();
        script.seen.push(query.unwrap_or_default());
        script.queue.pop_front()
    };
    let Some(reply) = next else {
        return (
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"Response":"False","Error":"Movie not found!"}"#,
        )
            .into_response();
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}
