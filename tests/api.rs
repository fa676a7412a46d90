#![cfg(not(target_arch = "wasm32"))]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use school_odds::data::{PrefillPayload, CLASSES, LYCEES};
use school_odds::server::{config::Config, router};

fn app() -> Router {
    router(&Config::default())
}

async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn prefill_returns_known_lycee_and_classe() {
    for _ in 0..50 {
        let request = Request::get("/api/prefill").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let payload: PrefillPayload = serde_json::from_slice(&body).unwrap();
        assert!(LYCEES.contains(&payload.lycee.as_str()), "{}", payload.lycee);
        assert!(CLASSES.contains(&payload.classe));
    }
}

#[tokio::test]
async fn prefill_uses_french_class_labels() {
    let request = Request::get("/api/prefill").body(Body::empty()).unwrap();
    let (_, body) = send(request).await;
    let value: Value = serde_json::from_slice(&body).unwrap();
    let classe = value["classe"].as_str().unwrap();
    assert!(["Seconde", "Première", "Terminale"].contains(&classe));
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn fiche_avenir_echoes_metadata() {
    let request = post_json(
        "/api/fiche-avenir",
        r#"{"name":"bulletin.pdf","size":12345}"#,
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value,
        json!({"ok": true, "received": {"name": "bulletin.pdf", "size": 12345}})
    );
}

async fn echo_of(body: &str) -> Value {
    let (status, bytes) = send(post_json("/api/fiche-avenir", body)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn fiche_avenir_echoes_any_number_as_size() {
    assert_eq!(
        echo_of(r#"{"name":"a.pdf","size":1.5}"#).await,
        json!({"ok": true, "received": {"name": "a.pdf", "size": 1.5}})
    );
    assert_eq!(
        echo_of(r#"{"name":"a.pdf","size":-1}"#).await,
        json!({"ok": true, "received": {"name": "a.pdf", "size": -1}})
    );
}

#[tokio::test]
async fn fiche_avenir_keeps_extra_and_missing_fields() {
    assert_eq!(
        echo_of(r#"{"name":"a.pdf","size":12345,"type":"application/pdf"}"#).await,
        json!({
            "ok": true,
            "received": {"name": "a.pdf", "size": 12345, "type": "application/pdf"}
        })
    );
    assert_eq!(
        echo_of(r#"{"name":"x"}"#).await,
        json!({"ok": true, "received": {"name": "x"}})
    );
}

#[tokio::test]
async fn fiche_avenir_rejects_malformed_json() {
    let (status, _) = send(post_json("/api/fiche-avenir", "{not json")).await;
    assert!(status.is_client_error(), "{status}");
}

#[tokio::test]
async fn prefill_rejects_post() {
    let (status, _) = send(post_json("/api/prefill", "{}")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_path_is_not_found_without_static_dir() {
    let request = Request::get("/index.html").body(Body::empty()).unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
