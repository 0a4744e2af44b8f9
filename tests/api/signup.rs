use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{assert_cors_headers, TestApp};

#[tokio::test]
async fn signup_valid_email_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_signup(&json!({ "email": "user@example.com" })).await?;

    assert_eq!(StatusCode::OK, res.status());
    assert_cors_headers(&res);
    assert_eq!(
        Some("application/json"),
        res.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
    );
    let body: Value = res.json().await?;
    assert_eq!(
        json!({ "success": true, "message": "Added to waitlist!" }),
        body
    );

    Ok(())
}

#[tokio::test]
async fn signup_forwards_one_notification_with_fixed_recipient() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_signup(&json!({ "email": "user@example.com" }))
        .await?;

    let requests = app
        .email_server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(1, requests.len());

    let auth = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(auth.starts_with("Bearer "), "got: {auth}");

    let sent: Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!("resend@axinbox.com", sent["to"]);
    assert_eq!("waitlist@axinbox.com", sent["from"]);
    assert!(sent["subject"]
        .as_str()
        .is_some_and(|s| s.contains("user@example.com")));

    Ok(())
}

#[tokio::test]
async fn signup_invalid_email_400_without_outbound_call() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let cases = [
        (json!({}), "Missing email"),
        (json!({ "email": "" }), "Empty email"),
        (json!({ "email": "not-an-email" }), "Invalid email"),
        (json!({ "email": "user@example" }), "Missing tld"),
        (json!({ "email": 42 }), "Non-string email"),
        (json!({ "name": "John Doe" }), "Unrelated field"),
    ];

    for (body, description) in cases {
        let res = app.post_signup(&body).await?;
        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "The API did not return a 400 BAD REQUEST for: {description}."
        );
        assert_cors_headers(&res);
        let body: Value = res.json().await?;
        assert_eq!(json!({ "error": "Valid email required" }), body);
    }

    Ok(())
}

#[tokio::test]
async fn signup_upstream_failure_500() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream detail"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_signup(&json!({ "email": "user@example.com" })).await?;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    assert_cors_headers(&res);
    let body = res.text().await?;
    assert!(!body.contains("upstream detail"));
    assert_eq!(
        json!({ "error": "Failed to subscribe" }),
        serde_json::from_str::<Value>(&body)?
    );

    Ok(())
}

#[tokio::test]
async fn signup_malformed_json_500() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let cases = [
        ("{\"email\":", "application/json"),
        ("email=user%40example.com", "application/x-www-form-urlencoded"),
        ("", "application/json"),
        ("null", "application/json"),
    ];

    for (body, content_type) in cases {
        let res = app.post_raw(body, content_type).await?;
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            res.status(),
            "for body {body:?}"
        );
        assert_cors_headers(&res);
        let body: Value = res.json().await?;
        assert_eq!(json!({ "error": "Internal server error" }), body);
    }

    Ok(())
}

#[tokio::test]
async fn signup_works_on_any_path() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .http_client
        .post(format!("http://{}/api/waitlist", app.addr))
        .json(&json!({ "email": "user@example.com" }))
        .send()
        .await?;

    assert_eq!(StatusCode::OK, res.status());

    Ok(())
}

/// A valid signup padded past the body limit.
fn oversized_signup() -> Vec<u8> {
    let mut payload = br#"{"email":"user@example.com","padding":""#.to_vec();
    payload.resize(3 * 1024 * 1024, b'x');
    payload.extend_from_slice(br#""}"#);
    payload
}

#[tokio::test]
async fn signup_oversized_body_is_json_internal_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app.send_bytes(Method::POST, oversized_signup()).await?;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    assert_cors_headers(&res);
    let body: Value = res.json().await?;
    assert_eq!(json!({ "error": "Internal server error" }), body);

    Ok(())
}

#[tokio::test]
async fn oversized_body_does_not_mask_the_method_check() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app.send_bytes(Method::GET, oversized_signup()).await?;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());
    assert_cors_headers(&res);
    let body: Value = res.json().await?;
    assert_eq!(json!({ "error": "Method not allowed" }), body);

    let res = app.send_bytes(Method::OPTIONS, oversized_signup()).await?;
    assert_eq!(StatusCode::NO_CONTENT, res.status());
    assert_cors_headers(&res);

    Ok(())
}
