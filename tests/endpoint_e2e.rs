//! End-to-end tests against a running server.

use std::time::Duration;

use reqwest::StatusCode;
use secure_echo::config::ServiceConfig;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_success_envelope_and_headers() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/bin/example"))
        .query(&[("user_id", "12345"), ("action", "view"), ("category-name", "electronics")])
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers().clone();
    assert_eq!(headers["content-type"], "application/json; charset=UTF-8");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(
        headers["strict-transport-security"],
        "max-age=31536000; includeSubDomains"
    );
    assert_eq!(headers["content-security-policy"], "default-src 'self'");
    assert!(headers.contains_key("x-request-id"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Request processed successfully");
    assert!(body["timestamp"].as_u64().unwrap() > 0);
    assert_eq!(body["parameters"]["user_id"], "12345");
    assert_eq!(body["parameters"]["category-name"], "electronics");
}

#[tokio::test]
async fn test_no_parameters_omits_key() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client().get(server.url("/bin/example")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("parameters").is_none());
}

#[tokio::test]
async fn test_only_first_value_echoed() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client()
        .get(server.url("/bin/example?tag=first&tag=second"))
        .send()
        .await
        .unwrap();

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["parameters"]["tag"], "first");
}

#[tokio::test]
async fn test_rejections_carry_no_security_headers() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/bin/example"))
        .query(&[("invalid<script>", "value")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.headers()["content-type"], "application/json; charset=UTF-8");
    assert!(!res.headers().contains_key("x-frame-options"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].as_str().unwrap().contains("Invalid parameter"));

    let long = "a".repeat(300);
    let res = client
        .get(server.url("/bin/example"))
        .query(&[("valid_param", long.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("too long"));
}

#[tokio::test]
async fn test_injection_payloads_are_escaped() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client()
        .get(server.url("/bin/example"))
        .query(&[("user_id", "1' OR '1'='1"), ("comment", "<script>alert('XSS')</script>")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let user_id = body["parameters"]["user_id"].as_str().unwrap();
    assert!(user_id.contains("&#x27;"));
    assert!(!user_id.contains('\''));
    let comment = body["parameters"]["comment"].as_str().unwrap();
    assert!(!comment.contains("<script>"));
    assert!(comment.contains("&lt;") && comment.contains("&gt;"));
}

#[tokio::test]
async fn test_oversized_response() {
    let mut config = ServiceConfig::default();
    config.endpoint.max_response_size = 10;
    let server = common::start_server(config).await;

    let res = common::client().get(server.url("/bin/example")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!res.headers().contains_key("x-frame-options"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Response payload too large");
    assert_eq!(body["statusCode"], 500);
}

#[tokio::test]
async fn test_config_update_applies_without_restart() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/bin/example")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let mut config = ServiceConfig::default();
    config.endpoint.max_response_size = 10;
    server.config_updates.send(config).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/bin/example")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = server.url("/bin/example");
        tasks.push(tokio::spawn(async move {
            let id = i.to_string();
            let res = client.get(&url).query(&[("n", id.as_str())]).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            let body: Value = res.json().await.unwrap();
            assert_eq!(body["parameters"]["n"], id.as_str());
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test]
async fn test_post_not_allowed() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client().post(server.url("/bin/example")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
