mod common;

use anyhow::Result;
use chrono::Duration;
use reqwest::StatusCode;
use serde_json::{json, Value};

use bookmarks_api::auth::TokenIssuer;
use common::{TestServer, TEST_JWT_SECRET};

#[tokio::test]
async fn me_returns_caller_profile() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let res = server.client.get(server.url("/users/me")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let me: Value = res.json().await?;
    assert_eq!(me["email"], "a@x.io");
    assert_eq!(me["firstName"], Value::Null);
    assert!(me["createdAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn patch_updates_only_given_names() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let res = server
        .client
        .patch(server.url("/users"))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "Ada", "lastName": "Lovelace" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .patch(server.url("/users"))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "Augusta" }))
        .send()
        .await?;
    let user: Value = res.json().await?;
    assert_eq!(user["firstName"], "Augusta");
    assert_eq!(user["lastName"], "Lovelace");
    assert_eq!(user["email"], "a@x.io");
    Ok(())
}

#[tokio::test]
async fn email_in_patch_is_ignored() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let res = server
        .client
        .patch(server.url("/users"))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "Ada", "email": "b@x.io" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = res.json().await?;
    assert_eq!(user["firstName"], "Ada");
    assert_eq!(user["email"], "a@x.io");

    let res = server
        .client
        .patch(server.url("/users"))
        .bearer_auth(&token)
        .json(&json!({ "id": 99 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let me: Value = server
        .client
        .get(server.url("/users/me"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(me["email"], "a@x.io");
    Ok(())
}

#[tokio::test]
async fn missing_or_malformed_header_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/users/me")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let res = server
        .client
        .get(server.url("/users/me"))
        .header("authorization", "Token abc")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;
    let issuer = TokenIssuer::new(TEST_JWT_SECRET, Duration::hours(1))?;
    let user_id = issuer.verify(&token)?;

    let expired = TokenIssuer::new(TEST_JWT_SECRET, Duration::hours(-1))?.issue(user_id)?;
    let res = server.client.get(server.url("/users/me")).bearer_auth(&expired).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn tampered_or_foreign_token_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    // Flip the first character of the signature segment
    let sig_start = token.rfind('.').expect("three-part token") + 1;
    let flipped = if token[sig_start..].starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}{}{}", &token[..sig_start], flipped, &token[sig_start + 1..]);

    let foreign = TokenIssuer::new("some-other-secret", Duration::hours(1))?.issue(1)?;

    for bad in [tampered, foreign, "garbage".to_string()] {
        let res = server.client.get(server.url("/users/me")).bearer_auth(&bad).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "token: {bad}");
    }
    Ok(())
}

#[tokio::test]
async fn token_for_unknown_user_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = TokenIssuer::new(TEST_JWT_SECRET, Duration::hours(1))?.issue(4242)?;

    let res = server.client.get(server.url("/users/me")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
