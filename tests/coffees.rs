mod common;

use std::collections::HashSet;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use cafe_api::state::Coffee;
use common::{body_json, delete, get, post_json, test_app};

#[tokio::test]
async fn create_then_get_returns_equivalent_coffee() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "Espresso", "price": 2.5}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_owned();
    let created: Coffee = body_json(response).await;
    assert_eq!(location, format!("/rest/coffees/{}", created.id));
    assert_eq!(created.name, "Espresso");
    assert_eq!(created.price, 2.5);

    let response = app.oneshot(get(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Coffee = body_json(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn created_ids_are_unique_and_client_ids_ignored() {
    let (app, _) = test_app();

    let mut ids = HashSet::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/rest/coffees", r#"{"id": 999, "name": "Latte", "price": 3.0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Coffee = body_json(response).await;
        assert_ne!(created.id, 999);
        assert!(ids.insert(created.id), "id {} assigned twice", created.id);
    }

    let response = app.oneshot(get("/rest/coffees/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_coffee_is_not_found() {
    let (app, _) = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "Cortado", "price": 3.2}"#))
        .await
        .unwrap();
    let created: Coffee = body_json(response).await;
    let uri = format!("/rest/coffees/{}", created.id);

    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(response).await;
    assert_eq!(body["error"], format!("coffee {} not found", created.id));
}

#[tokio::test]
async fn deleting_missing_coffee_is_not_an_error() {
    let (app, _) = test_app();
    let response = app.clone().oneshot(delete("/rest/coffees/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app.oneshot(delete("/rest/coffees/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn list_returns_remaining_coffees() {
    let (app, _) = test_app();

    let mut created = Vec::new();
    for (name, price) in [("Americano", 2.8), ("Mocha", 4.1), ("Lungo", 2.6), ("Doppio", 3.0)] {
        let body = serde_json::json!({"name": name, "price": price}).to_string();
        let response = app.clone().oneshot(post_json("/rest/coffees", &body)).await.unwrap();
        created.push(body_json::<Coffee>(response).await);
    }
    for coffee in &created[..2] {
        app.clone()
            .oneshot(delete(&format!("/rest/coffees/{}", coffee.id)))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/rest/coffees")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Coffee> = body_json(response).await;
    assert_eq!(listed, created[2..].to_vec());
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/rest/coffees")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Coffee> = body_json(response).await;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn malformed_payloads_are_rejected() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "Espresso""#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "  ", "price": 1.0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "Espresso"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/rest/coffees")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Body::from("<coffee/>"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn oversized_payload_is_too_large() {
    let (app, _) = test_app();
    let body = format!(r#"{{"name": "{}", "price": 1.0}}"#, "a".repeat(3 * 1024 * 1024));
    let response = app.oneshot(post_json("/rest/coffees", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/rest/coffees/latte")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_json_accept_is_not_acceptable() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/rest/coffees")
        .header(header::ACCEPT, "application/xml")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    let request = Request::builder()
        .uri("/rest/coffees")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_ignores_accept_header() {
    let (app, _) = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "Macchiato", "price": 3.4}"#))
        .await
        .unwrap();
    let created: Coffee = body_json(response).await;

    for (accept, id) in [("text/plain", created.id), ("application/xml", 404)] {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/rest/coffees/{}", id))
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "Accept: {}", accept);
    }

    let response = app.oneshot(get(&format!("/rest/coffees/{}", created.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_reads_are_counted_under_concurrency() {
    let (app, state) = test_app();
    let before = state.list_invocations.value();

    let calls: Vec<_> = (0..32)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { app.oneshot(get("/rest/coffees")).await.unwrap().status() })
        })
        .collect();
    for call in calls {
        assert_eq!(call.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(state.list_invocations.value(), before + 32);
}

#[tokio::test]
async fn only_list_reads_are_counted() {
    let (app, state) = test_app();
    app.clone()
        .oneshot(post_json("/rest/coffees", r#"{"name": "Ristretto", "price": 2.0}"#))
        .await
        .unwrap();
    app.clone().oneshot(get("/rest/coffees/1")).await.unwrap();
    app.oneshot(delete("/rest/coffees/1")).await.unwrap();

    assert_eq!(state.list_invocations.value(), 0);
}
