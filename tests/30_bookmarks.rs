mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use chrono::Duration;

use bookmarks_api::auth::TokenIssuer;
use common::{TestServer, TEST_JWT_SECRET};

#[tokio::test]
async fn full_bookmark_lifecycle() -> Result<()> {
    let server = TestServer::spawn().await?;
    assert_eq!(server.signup("a@x.io", "pw1").await?.status(), StatusCode::CREATED);

    let signin: Value = server.signin("a@x.io", "pw1").await?.json().await?;
    let token = signin["access_token"].as_str().expect("access_token").to_string();

    // Create
    let res = server
        .client
        .post(server.url("/bookmarks"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Rust", "link": "https://rust-lang.org", "description": "lang" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_i64().expect("numeric id");
    assert_eq!(created["title"], "Rust");

    // Get
    let res = server
        .client
        .get(server.url(&format!("/bookmarks/{id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, created);

    // Patch title only
    let res = server
        .client
        .patch(server.url(&format!("/bookmarks/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "title": "Rust Lang" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let edited: Value = res.json().await?;
    assert_eq!(edited["title"], "Rust Lang");
    assert_eq!(edited["link"], "https://rust-lang.org");
    assert_eq!(edited["description"], "lang");

    // Delete
    let res = server
        .client
        .delete(server.url(&format!("/bookmarks/{id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    // Gone from list and get
    let list: Value = server
        .client
        .get(server.url("/bookmarks"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(list, json!([]));

    let res = server
        .client
        .get(server.url(&format!("/bookmarks/{id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn list_grows_with_each_create_in_id_order() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let list: Value = server
        .client
        .get(server.url("/bookmarks"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(list, json!([]));

    for n in 0..3 {
        server
            .create_bookmark(&token, &format!("b{n}"), &format!("https://x.io/{n}"))
            .await?;
    }

    let list: Value = server
        .client
        .get(server.url("/bookmarks"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 3);

    let ids: Vec<i64> = items.iter().filter_map(|b| b["id"].as_i64()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(items[0]["title"], "b0");
    Ok(())
}

#[tokio::test]
async fn invalid_create_bodies_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let cases = [
        json!({ "link": "https://x.io" }),
        json!({ "title": "x" }),
        json!({ "title": "", "link": "https://x.io" }),
        json!({ "title": "x", "link": "https://x.io", "userId": 99 }),
    ];

    for body in cases {
        let res = server
            .client
            .post(server.url("/bookmarks"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let res = server
        .client
        .get(server.url("/bookmarks/abc"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_with_token_for_unknown_user_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = TokenIssuer::new(TEST_JWT_SECRET, Duration::hours(1))?.issue(4242)?;

    let res = server
        .client
        .post(server.url("/bookmarks"))
        .bearer_auth(&token)
        .json(&json!({ "title": "T", "link": "L" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "User not found");
    Ok(())
}

#[tokio::test]
async fn patch_with_null_description_clears_it() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token_for("a@x.io").await?;

    let res = server
        .client
        .post(server.url("/bookmarks"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Rust", "link": "https://rust-lang.org", "description": "lang" }))
        .send()
        .await?;
    let created: Value = res.json().await?;
    let path = format!("/bookmarks/{}", created["id"]);

    let kept: Value = server
        .client
        .patch(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "title": "Rust Lang" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(kept["description"], "lang");

    let res = server
        .client
        .patch(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "description": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared: Value = res.json().await?;
    assert_eq!(cleared["description"], Value::Null);
    assert_eq!(cleared["title"], "Rust Lang");
    Ok(())
}

#[tokio::test]
async fn bookmarks_require_a_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/bookmarks")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .post(server.url("/bookmarks"))
        .json(&json!({ "title": "x", "link": "https://x.io" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
