//! End-to-end HTTP tests over the real router and an in-memory database.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

use pressroom::{
    AppState, TursoClient, api::routes::create_app, auth::jwt::AuthService,
    types::Claims,
};

const SECRET: &str = "integration-test-secret-at-least-32-bytes";

async fn create_test_server() -> TestServer {
    let db = TursoClient::new_memory()
        .await
        .expect("Failed to create in-memory database");

    let state = AppState {
        db: Arc::new(db),
        auth_service: Arc::new(AuthService::new(SECRET.to_string(), 3600)),
    };

    TestServer::new(create_app(state)).expect("Failed to create test server")
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Registers `email` and returns a fresh token for it.
async fn signup(server: &TestServer, email: &str) -> String {
    server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": "p1" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "p1" }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

async fn user_id(server: &TestServer, token: &str) -> i64 {
    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(token))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["user"]["sub"]
        .as_i64()
        .expect("numeric sub")
}

async fn create_article(server: &TestServer, token: &str, title: &str) -> i64 {
    let response = server
        .post("/api/articles")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "title": title, "body": "Body text", "category": "news" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().expect("article id")
}

async fn create_comment(server: &TestServer, token: &str, article_id: i64, body: &str) -> i64 {
    let response = server
        .post(&format!("/api/articles/{}/comments", article_id))
        .add_header("Authorization", bearer(token))
        .json(&json!({ "body": body }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().expect("comment id")
}

// ============= Health =============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

// ============= Registration & Login =============

#[tokio::test]
async fn test_register_then_duplicate_conflicts() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "p1" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["message"], "User created");

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "other" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert!(response.json::<Value>()["message"].is_string());
}

#[rstest]
#[case(json!({ "password": "p1" }))]
#[case(json!({ "email": "a@x.com" }))]
#[case(json!({ "email": "   ", "password": "p1" }))]
#[case(json!({ "email": "a@x.com", "password": "" }))]
#[tokio::test]
async fn test_register_missing_fields(#[case] body: Value) {
    let server = create_test_server().await;

    let response = server.post("/api/auth/register").json(&body).await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"].is_string());
}

#[tokio::test]
async fn test_login_reports_token_lifetime() {
    let server = create_test_server().await;
    signup(&server, "a@x.com").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "p1" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["expires_in"], 3600);
}

#[tokio::test]
async fn test_login_returns_token_for_same_user() {
    let server = create_test_server().await;
    let token = signup(&server, "a@x.com").await;

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Token OK");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"]["sub"].is_i64());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let server = create_test_server().await;
    signup(&server, "a@x.com").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "nope" }))
        .await;
    wrong_password.assert_status_unauthorized();

    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@x.com", "password": "p1" }))
        .await;
    unknown_user.assert_status_unauthorized();

    assert_eq!(
        wrong_password.json::<Value>()["message"],
        unknown_user.json::<Value>()["message"]
    );
}

// ============= Bearer Gate =============

#[rstest]
#[case::missing(None)]
#[case::lowercase_scheme(Some("bearer abc".to_string()))]
#[case::basic_scheme(Some("Basic YTpi".to_string()))]
#[case::empty_token(Some("Bearer ".to_string()))]
#[case::garbage(Some("Bearer not.a.jwt".to_string()))]
#[tokio::test]
async fn test_me_rejects_bad_headers(#[case] header: Option<String>) {
    let server = create_test_server().await;

    let mut request = server.get("/api/auth/me");
    if let Some(value) = header {
        request = request.add_header("Authorization", value);
    }
    let response = request.await;

    response.assert_status_unauthorized();
    assert!(response.json::<Value>()["message"].is_string());
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let server = create_test_server().await;
    let forger = AuthService::new("some-other-secret-that-is-32-bytes-long".to_string(), 3600);
    let forged = forger.issue_token(1, "a@x.com").expect("sign");

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&forged))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let server = create_test_server().await;
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: 1,
        email: "a@x.com".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("encode");

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&expired))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_protected_write_without_token_does_not_mutate() {
    let server = create_test_server().await;

    server
        .post("/api/articles")
        .json(&json!({ "title": "t", "body": "b", "category": "c" }))
        .await
        .assert_status_unauthorized();

    let list = server.get("/api/articles").await;
    list.assert_status_ok();
    assert_eq!(list.json::<Value>(), json!([]));
}

// ============= Articles =============

#[tokio::test]
async fn test_reads_are_public() {
    let server = create_test_server().await;
    let token = signup(&server, "a@x.com").await;
    let id = create_article(&server, &token, "Hello").await;

    server.get("/api/articles").await.assert_status_ok();
    let response = server.get(&format!("/api/articles/{}", id)).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["author"], "a@x.com");
    assert_eq!(body["category"], "news");
}

#[tokio::test]
async fn test_create_article_ignores_client_supplied_owner() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let b = signup(&server, "b@x.com").await;
    let a_id = user_id(&server, &a).await;
    let b_id = user_id(&server, &b).await;

    let response = server
        .post("/api/articles")
        .add_header("Authorization", bearer(&a))
        .json(&json!({
            "title": "Mine",
            "body": "text",
            "category": "misc",
            "author_id": b_id,
            "user_id": b_id
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_i64().expect("id");

    let article = server.get(&format!("/api/articles/{}", id)).await;
    assert_eq!(article.json::<Value>()["author_id"], a_id);
}

#[tokio::test]
async fn test_ownership_scenario() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let b = signup(&server, "b@x.com").await;
    let id = create_article(&server, &a, "A's article").await;
    let path = format!("/api/articles/{}", id);

    // B may neither edit nor delete A's article
    server
        .put(&path)
        .add_header("Authorization", bearer(&b))
        .json(&json!({ "title": "hijacked", "body": "x", "category": "x" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&path)
        .add_header("Authorization", bearer(&b))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["message"],
        "You can only modify your own articles"
    );

    let unchanged = server.get(&path).await;
    unchanged.assert_status_ok();
    assert_eq!(unchanged.json::<Value>()["title"], "A's article");

    // A may
    let response = server
        .delete(&path)
        .add_header("Authorization", bearer(&a))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Article deleted");

    server.get(&path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_owner_can_update_article() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let id = create_article(&server, &a, "Draft").await;
    let path = format!("/api/articles/{}", id);

    server
        .put(&path)
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "title": "Final", "body": "Done", "category": "essays" }))
        .await
        .assert_status_ok();

    let body = server.get(&path).await.json::<Value>();
    assert_eq!(body["title"], "Final");
    assert_eq!(body["body"], "Done");
    assert_eq!(body["category"], "essays");
}

#[tokio::test]
async fn test_nonexistent_article_is_not_found_for_everyone() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;

    server.get("/api/articles/9999").await.assert_status_not_found();

    server
        .put("/api/articles/9999")
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "title": "t", "body": "b", "category": "c" }))
        .await
        .assert_status_not_found();

    server
        .delete("/api/articles/9999")
        .add_header("Authorization", bearer(&a))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_articles_newest_first() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    create_article(&server, &a, "first").await;
    create_article(&server, &a, "second").await;

    let list = server.get("/api/articles").await.json::<Value>();
    let titles: Vec<&str> = list
        .as_array()
        .expect("array")
        .iter()
        .map(|a| a["title"].as_str().expect("title"))
        .collect();

    assert_eq!(titles, vec!["second", "first"]);
}

#[rstest]
#[case("/api/articles/abc")]
#[case("/api/articles/1.5")]
#[case("/api/articles/abc/comments")]
#[tokio::test]
async fn test_non_integer_ids_on_reads(#[case] path: &str) {
    let server = create_test_server().await;

    let response = server.get(path).await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"].is_string());
}

#[tokio::test]
async fn test_non_integer_ids_on_writes() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;

    server
        .delete("/api/articles/abc")
        .add_header("Authorization", bearer(&a))
        .await
        .assert_status_bad_request();

    server
        .put("/api/comments/xyz")
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "body": "b" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_article_validation() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;

    let response = server
        .post("/api/articles")
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "title": "t", "body": "b" }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["message"], "Missing field: category");
}

#[tokio::test]
async fn test_malformed_json_is_a_json_400() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;

    let response = server
        .post("/api/articles")
        .add_header("Authorization", bearer(&a))
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{not json"))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"].is_string());

    // No body at all
    let response = server.post("/api/auth/register").await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"].is_string());
}

// ============= Comments =============

#[tokio::test]
async fn test_comment_on_missing_article_is_not_found() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;

    let response = server
        .post("/api/articles/9999/comments")
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "body": "hello" }))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["message"], "Article not found");
}

#[tokio::test]
async fn test_anyone_may_comment_and_comments_list_oldest_first() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let b = signup(&server, "b@x.com").await;
    let article = create_article(&server, &a, "Post").await;

    create_comment(&server, &b, article, "first!").await;
    create_comment(&server, &a, article, "thanks").await;

    let list = server
        .get(&format!("/api/articles/{}/comments", article))
        .await;
    list.assert_status_ok();
    let list = list.json::<Value>();
    let comments = list.as_array().expect("array");

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["body"], "first!");
    assert_eq!(comments[0]["author"], "b@x.com");
    assert_eq!(comments[1]["body"], "thanks");
}

#[tokio::test]
async fn test_create_comment_ignores_client_supplied_owner() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let b = signup(&server, "b@x.com").await;
    let a_id = user_id(&server, &a).await;
    let b_id = user_id(&server, &b).await;
    let article = create_article(&server, &a, "Post").await;

    server
        .post(&format!("/api/articles/{}/comments", article))
        .add_header("Authorization", bearer(&b))
        .json(&json!({ "body": "hi", "user_id": a_id, "author_id": a_id }))
        .await
        .assert_status(StatusCode::CREATED);

    let list = server
        .get(&format!("/api/articles/{}/comments", article))
        .await
        .json::<Value>();
    assert_eq!(list[0]["author_id"], b_id);
    assert_eq!(list[0]["author"], "b@x.com");
}

#[tokio::test]
async fn test_comment_ownership_is_independent_of_article_ownership() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let b = signup(&server, "b@x.com").await;
    let article = create_article(&server, &a, "Post").await;
    let comment = create_comment(&server, &b, article, "B's comment").await;
    let path = format!("/api/comments/{}", comment);

    // The article's owner still cannot touch B's comment
    server
        .put(&path)
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "body": "edited by A" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&path)
        .add_header("Authorization", bearer(&a))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["message"],
        "You can only modify your own comments"
    );

    server
        .put(&path)
        .add_header("Authorization", bearer(&b))
        .json(&json!({ "body": "edited by B" }))
        .await
        .assert_status_ok();

    let list = server
        .get(&format!("/api/articles/{}/comments", article))
        .await
        .json::<Value>();
    assert_eq!(list[0]["body"], "edited by B");

    server
        .delete(&path)
        .add_header("Authorization", bearer(&b))
        .await
        .assert_status_ok();

    let list = server
        .get(&format!("/api/articles/{}/comments", article))
        .await
        .json::<Value>();
    assert_eq!(list, json!([]));

    // The article is untouched
    server
        .get(&format!("/api/articles/{}", article))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_nonexistent_comment_is_not_found() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;

    server
        .put("/api/comments/9999")
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "body": "x" }))
        .await
        .assert_status_not_found();

    server
        .delete("/api/comments/9999")
        .add_header("Authorization", bearer(&a))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_empty_comment_rejected() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let article = create_article(&server, &a, "Post").await;

    server
        .post(&format!("/api/articles/{}/comments", article))
        .add_header("Authorization", bearer(&a))
        .json(&json!({ "body": "   " }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_deleting_article_removes_its_comments() {
    let server = create_test_server().await;
    let a = signup(&server, "a@x.com").await;
    let article = create_article(&server, &a, "Post").await;
    let comment = create_comment(&server, &a, article, "note").await;

    server
        .delete(&format!("/api/articles/{}", article))
        .add_header("Authorization", bearer(&a))
        .await
        .assert_status_ok();

    let list = server
        .get(&format!("/api/articles/{}/comments", article))
        .await;
    list.assert_status_ok();
    assert_eq!(list.json::<Value>(), json!([]));

    server
        .delete(&format!("/api/comments/{}", comment))
        .add_header("Authorization", bearer(&a))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_unknown_api_path_is_not_found_not_unauthorized() {
    let server = create_test_server().await;

    server.get("/api/nothing-here").await.assert_status_not_found();
}
