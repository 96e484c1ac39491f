mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::StatusCode;
use serde_json::json;

fn rental_form(name: &str, surface: &str, price: &str) -> Form {
    Form::new()
        .text("name", name.to_string())
        .text("surface", surface.to_string())
        .text("price", price.to_string())
        .text("description", "Bright, close to the station")
}

fn png_part() -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\nfake".to_vec())
        .file_name("living-room.png")
        .mime_str("image/png")
        .expect("Invalid mime type")
}

#[tokio::test]
async fn test_register_then_me_returns_same_principal() {
    let app = TestApp::spawn().await;

    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["id"], 1);
    assert_eq!(
        body["created_at"],
        Utc::now().format("%Y/%m/%d").to_string()
    );
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("Bob", "bob@example.com", "secret1").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Bobby",
            "email": "bob@example.com",
            "password": "another1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("bob@example.com"));
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({"name": "Bob", "email": "not-an-email", "password": "secret1"}),
        json!({"name": "", "email": "bob@example.com", "password": "secret1"}),
        json!({"name": "Bob", "email": "bob@example.com", "password": "short"}),
        json!({"name": "Bob", "email": "bob@example.com"}),
    ];

    for case in cases {
        let response = app
            .post("/api/auth/register")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case: {}", case);
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("Bob", "bob@example.com", "secret1").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({"email": "bob@example.com", "password": "secret1"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().unwrap();

    let me = app
        .get_authenticated("/api/auth/me", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Bob", "bob@example.com", "secret1").await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({"email": "bob@example.com", "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "anything"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let first: serde_json::Value = wrong_password.json().await.unwrap();
    let second: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(first, json!({"message": "error"}));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::spawn().await;

    for path in ["/api/auth/me", "/api/rentals", "/api/rentals/1", "/api/user/1"] {
        let response = app
            .get(path)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "path: {}", path);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = app
        .get_authenticated("/api/auth/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    app.clock.advance(Duration::hours(25));

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_deleted_account_is_unauthorized() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    app.users.remove_by_email("alice@example.com").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;
    app.register("Bob", "bob@example.com", "secret1").await;

    let response = app
        .get_authenticated("/api/user/2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Bob");

    let missing = app
        .get_authenticated("/api/user/99", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rental_with_picture() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let response = app
        .post_authenticated("/api/rentals", &token)
        .multipart(
            rental_form("Loft", "65.5", "850")
                .text("owner_id", "42")
                .part("picture", png_part()),
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Rental created !"}));

    let rental: serde_json::Value = app
        .get_authenticated("/api/rentals/1", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(rental["name"], "Loft");
    assert_eq!(rental["surface"], 65.5);
    assert_eq!(rental["price"], 850.0);
    assert_eq!(rental["description"], "Bright, close to the station");
    assert_eq!(rental["owner_id"], 1);

    let picture = rental["picture"].as_str().expect("Missing picture URL");
    assert!(picture.starts_with(&app.url("/uploads/")));
    assert!(picture.ends_with(".png"));

    let served = app
        .api_client
        .get(picture)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(
        served.bytes().await.unwrap().as_ref(),
        b"\x89PNG\r\n\x1a\nfake"
    );
}

#[tokio::test]
async fn test_create_rental_rejects_invalid_form() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let negative_price = app
        .post_authenticated("/api/rentals", &token)
        .multipart(rental_form("Loft", "65.5", "-1"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(negative_price.status(), StatusCode::BAD_REQUEST);

    let not_an_image = app
        .post_authenticated("/api/rentals", &token)
        .multipart(
            rental_form("Loft", "65.5", "850").part(
                "picture",
                Part::bytes(b"#!/bin/sh".to_vec())
                    .file_name("run.sh")
                    .mime_str("text/x-shellscript")
                    .unwrap(),
            ),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(not_an_image.status(), StatusCode::BAD_REQUEST);

    let listing: serde_json::Value = app
        .get_authenticated("/api/rentals", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(listing, json!({"rentals": []}));
}

#[tokio::test]
async fn test_non_numeric_id_gets_json_error() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    for path in ["/api/rentals/abc", "/api/user/abc"] {
        let response = app
            .get_authenticated(path, &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "path: {}", path);

        let body: serde_json::Value = response.json().await.expect("Body is not JSON");
        assert!(body["message"].is_string());
    }

    let response = app
        .put_authenticated("/api/rentals/abc", &token)
        .multipart(rental_form("Loft", "65.5", "850"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Body is not JSON");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_rental_rejects_svg_picture() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let response = app
        .post_authenticated("/api/rentals", &token)
        .multipart(
            rental_form("Loft", "65.5", "850").part(
                "picture",
                Part::bytes(b"<svg xmlns=\"http://www.w3.org/2000/svg\" onload=\"alert(1)\"/>".to_vec())
                    .file_name("plan.svg")
                    .mime_str("image/svg+xml")
                    .unwrap(),
            ),
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_update_rental_by_owner() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    app.post_authenticated("/api/rentals", &token)
        .multipart(rental_form("Loft", "65.5", "850"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .put_authenticated("/api/rentals/1", &token)
        .multipart(rental_form("Renovated loft", "65.5", "990"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Rental updated !");

    let rental: serde_json::Value = app
        .get_authenticated("/api/rentals/1", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(rental["name"], "Renovated loft");
    assert_eq!(rental["price"], 990.0);
}

#[tokio::test]
async fn test_update_rental_by_non_owner_is_forbidden() {
    let app = TestApp::spawn().await;
    let owner = app.register("Alice", "alice@example.com", "secret1").await;
    let intruder = app.register("Mallory", "mallory@example.com", "secret1").await;

    app.post_authenticated("/api/rentals", &owner)
        .multipart(rental_form("Loft", "65.5", "850"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .put_authenticated("/api/rentals/1", &intruder)
        .multipart(rental_form("Stolen loft", "10", "1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let rental: serde_json::Value = app
        .get_authenticated("/api/rentals/1", &owner)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(rental["name"], "Loft");
}

#[tokio::test]
async fn test_missing_rental_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let get = app
        .get_authenticated("/api/rentals/7", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(get.status(), StatusCode::NOT_FOUND);

    let put = app
        .put_authenticated("/api/rentals/7", &token)
        .multipart(rental_form("Loft", "65.5", "850"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(put.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_send_message_uses_principal_as_sender() {
    let app = TestApp::spawn().await;
    let owner = app.register("Alice", "alice@example.com", "secret1").await;
    let tenant = app.register("Bob", "bob@example.com", "secret1").await;

    app.post_authenticated("/api/rentals", &owner)
        .multipart(rental_form("Loft", "65.5", "850"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post_authenticated("/api/messages", &tenant)
        .json(&json!({
            "rental_id": 1,
            "user_id": 1,
            "message": "Is it still available?"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Message send with success");

    let messages = app.messages.all().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].user_id.0, 2);
    assert_eq!(messages[0].content.as_str(), "Is it still available?");
}

#[tokio::test]
async fn test_send_message_to_unknown_rental() {
    let app = TestApp::spawn().await;
    let token = app.register("Bob", "bob@example.com", "secret1").await;

    let response = app
        .post_authenticated("/api/messages", &token)
        .json(&json!({"rental_id": 404, "message": "Hello"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.messages.all().await.is_empty());
}

#[tokio::test]
async fn test_upload_directory_is_public() {
    let app = TestApp::spawn().await;
    std::fs::write(app.upload_dir.path().join("existing.png"), b"img").unwrap();

    let response = app
        .get("/uploads/existing.png")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
