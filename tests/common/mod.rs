#![allow(dead_code)]

use std::{sync::Arc, time::Duration};
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;

use cafe_api::{
    create_router,
    health::{ReadinessCheck, StartupCheck},
    metrics::{InvocationCounter, LIST_INVOCATIONS, LIST_INVOCATIONS_DESCRIPTION},
    repository::InMemoryCoffeeRepository,
    services::CpuLoadSource,
    AppState,
};

pub struct FixedCpuLoad(pub f64);

impl CpuLoadSource for FixedCpuLoad {
    fn system_cpu_load(&self) -> f64 {
        self.0
    }
}

/// Application state with an empty store, a readiness check against `readiness_url`
/// and a startup check fed a fixed CPU load
pub fn test_state(readiness_url: &str, cpu_load: f64) -> Arc<AppState> {
    let readiness = ReadinessCheck::new(readiness_url, Duration::from_secs(2)).unwrap();
    let startup = StartupCheck::new(Arc::new(FixedCpuLoad(cpu_load)), false);
    Arc::new(AppState::new(
        Arc::new(InMemoryCoffeeRepository::new()),
        InvocationCounter::register(LIST_INVOCATIONS, LIST_INVOCATIONS_DESCRIPTION),
        Arc::new(readiness),
        Arc::new(startup),
    ))
}

pub fn test_app() -> (Router, Arc<AppState>) {
    let state = test_state("http://127.0.0.1:1/rest/coffees", 0.5);
    (create_router(Arc::clone(&state), None), state)
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A local URL nothing is listening on
pub async fn unbound_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/rest/coffees", addr)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
