//! In-process source and target endpoints for integration tests

#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::{get, post};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use relay_client::RelayClient;
use relay_runner::Config;

/// Payloads received by the fake target, in arrival order
#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<Value>>>);

impl Received {
    pub fn payloads(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Number of GETs served by the fake source
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serves `router` on an ephemeral localhost port
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Source answering `/api/system/info` with a fixed status and body
pub async fn spawn_source(status: StatusCode, body: &'static str) -> (SocketAddr, Hits) {
    let hits = Hits::default();
    let counter = hits.clone();

    let router = Router::new().route(
        "/api/system/info",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.0.fetch_add(1, Ordering::SeqCst);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    (serve(router).await, hits)
}

/// Target accepting JSON on `/ingest` and answering with `status`
pub async fn spawn_target(status: StatusCode) -> (String, Received) {
    let received = Received::default();
    let sink = received.clone();

    let router = Router::new().route(
        "/ingest",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.0.lock().unwrap().push(body);
                status
            }
        }),
    );

    let addr = serve(router).await;
    (format!("http://{}/ingest", addr), received)
}

pub fn config_for(source: SocketAddr, target_url: &str) -> Config {
    Config {
        system_ip: source.to_string(),
        target_url: target_url.to_string(),
        interval_minutes: 1,
    }
}

pub fn client_for(config: &Config) -> RelayClient {
    RelayClient::new(&config.system_ip, &config.target_url).unwrap()
}
