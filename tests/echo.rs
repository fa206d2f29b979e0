//! Integration tests for the echo endpoint.

use http_echo::config::EchoConfig;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn response_has_exactly_the_five_echo_fields() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let body: Value = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let object = body.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, ["args", "form", "headers", "json", "remote_user"]);
}

#[tokio::test]
async fn get_echoes_query_args_and_headers() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/?a=1&b=2", addr))
        .header("X-Test", "foo")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["args"], json!({"a": "1", "b": "2"}));
    assert_eq!(body["headers"]["X-Test"], json!("foo"));
    assert_eq!(body["form"], json!({}));
    assert_eq!(body["json"], Value::Null);
}

#[tokio::test]
async fn post_echoes_json_body() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/json")
        .body(r#"{"x":42}"#)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["json"], json!({"x": 42}));
    assert_eq!(body["form"], json!({}));
}

#[tokio::test]
async fn post_echoes_form_body() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("name=Alice&age=30")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["form"], json!({"name": "Alice", "age": "30"}));
    assert_eq!(body["json"], Value::Null);
}

#[tokio::test]
async fn form_content_type_with_charset_still_parses() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("http://{}/", addr))
        .header(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=utf-8",
        )
        .body("k=v")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["form"], json!({"k": "v"}));
}

#[tokio::test]
async fn malformed_json_body_echoes_null_not_an_error() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/json")
        .body("{bad json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["json"], Value::Null);
}

#[tokio::test]
async fn non_json_non_form_body_echoes_empty() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("http://{}/", addr))
        .header("Content-Type", "text/plain")
        .body("just some text")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["form"], json!({}));
    assert_eq!(body["json"], Value::Null);
}

#[tokio::test]
async fn json_array_and_scalar_bodies_pass_through() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    for (sent, expected) in [
        (r#"[1,2,3]"#, json!([1, 2, 3])),
        (r#""hello""#, json!("hello")),
        ("null", Value::Null),
    ] {
        let body: Value = client
            .post(format!("http://{}/", addr))
            .header("Content-Type", "application/json")
            .body(sent)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["json"], expected);
    }
}

#[tokio::test]
async fn remote_user_header_passes_through() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("http://{}/", addr))
        .header("X-Remote-User", "alice")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["remote_user"], json!("alice"));

    let body: Value = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["remote_user"], Value::Null);
}

#[tokio::test]
async fn configured_remote_user_header_is_honored() {
    let mut config = EchoConfig::default();
    config.auth.remote_user_header = "x-forwarded-user".to_string();
    let (addr, _shutdown) = common::spawn_echo_server(config).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("http://{}/", addr))
        .header("X-Forwarded-User", "bob")
        .header("X-Remote-User", "ignored")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["remote_user"], json!("bob"));
}

#[tokio::test]
async fn identical_requests_echo_identically() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let mut bodies = Vec::new();
    for _ in 0..2 {
        let body: Value = client
            .get(format!("http://{}/?q=same", addr))
            .header("X-Probe", "1")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();

    // Simple cross-origin request.
    let response = client
        .get(format!("http://{}/", addr))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"]
            .to_str()
            .unwrap(),
        "*"
    );

    // Preflight.
    let response = client
        .request(reqwest::Method::OPTIONS, format!("http://{}/", addr))
        .header("Origin", "http://example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"]
            .to_str()
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn unsupported_methods_are_rejected_by_routing() {
    let (addr, _shutdown) = common::spawn_echo_server(EchoConfig::default()).await;

    let client = reqwest::Client::new();
    let response = client
        .put(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn oversized_body_is_rejected_by_limit_layer() {
    let mut config = EchoConfig::default();
    config.limits.max_body_bytes = 64;
    let (addr, _shutdown) = common::spawn_echo_server(config).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/json")
        .body("x".repeat(1024))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 413);
}
