//! End-to-end tests driving the full router over a temporary data directory.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use hanzi_trainer::config::{AnonymousVisibility, WordSettings};
use hanzi_trainer::paths;
use hanzi_trainer::routes;
use hanzi_trainer::state::AppState;

const DICTIONARY: &str = r#"[
  {"id": 1, "simplified": "你好", "pinyin": "nǐ hǎo", "translation": "hello", "hsk_level": 1},
  {"id": "2", "simplified": "谢谢", "pinyin": "xiè xie", "translation": "thank you",
   "example": "谢谢你。", "example_translation": "Thank you."},
  {"id": 3, "simplified": "再见", "pinyin": "zài jiàn", "translation": "goodbye"}
]"#;

struct TestApp {
    temp: TempDir,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        Self::with_settings(WordSettings::default())
    }

    fn with_settings(settings: WordSettings) -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::write(paths::dictionary_path(temp.path()), DICTIONARY).unwrap();
        let state = AppState::open(temp.path(), settings).unwrap();
        Self { temp, state }
    }

    /// A client with its own cookie jar
    fn client(&self) -> TestServer {
        TestServer::builder()
            .save_cookies()
            .build(routes::router(self.state.clone()))
            .unwrap()
    }

    async fn signed_in(&self, username: &str) -> TestServer {
        let server = self.client();
        server
            .post("/api/auth/register")
            .json(&json!({ "username": username, "password": "secret123" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
    }
}

async fn add_word(server: &TestServer, simplified: &str, pinyin: &str) -> Value {
    let response = server
        .post("/api/words")
        .json(&json!({ "simplified": simplified, "pinyin": pinyin, "translation": "word" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["word"].clone()
}

async fn stats(server: &TestServer) -> Value {
    let body = server.get("/api/auth/stats").await.json::<Value>();
    body["stats"].clone()
}

fn ids(words: &Value) -> Vec<String> {
    words
        .as_array()
        .unwrap()
        .iter()
        .map(|w| match &w["id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

#[tokio::test]
async fn test_index_liveness() {
    let app = TestApp::new();
    let response = app.client().get("/").await;
    response.assert_status_ok();
    response.assert_text("Chinese Trainer API is running!");
}

#[tokio::test]
async fn test_register_login_check_logout() {
    let app = TestApp::new();
    let server = app.client();

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": " mei ", "password": "secret123", "email": "mei@example.com" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "mei");
    assert_eq!(body["user"]["stats"]["words_added"], 0);
    assert!(body["user"].get("password_hash").is_none());

    let check = server.get("/api/auth/check").await.json::<Value>();
    assert_eq!(check["authenticated"], true);
    assert_eq!(check["user"]["username"], "mei");

    server.post("/api/auth/logout").await.assert_status_ok();
    let check = server.get("/api/auth/check").await.json::<Value>();
    assert_eq!(check["authenticated"], false);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "mei", "password": "secret123" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["user"]["username"], "mei");
    assert_eq!(server.get("/api/auth/check").await.json::<Value>()["authenticated"], true);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();
    let server = app.client();

    for body in [
        json!({ "username": "", "password": "secret123" }),
        json!({ "username": "ab", "password": "secret123" }),
        json!({ "username": "mei", "password": "12345" }),
    ] {
        let response = server.post("/api/auth/register").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    app.signed_in("mei").await;
    server
        .post("/api/auth/register")
        .json(&json!({ "username": "mei", "password": "secret123" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new();
    app.signed_in("mei").await;
    let server = app.client();

    server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": "secret123" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post("/api/auth/login")
        .json(&json!({ "username": "mei", "password": "wrong-password" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/auth/login")
        .json(&json!({ "username": "mei" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();
    let server = app.signed_in("mei").await;

    let response = server
        .post("/api/words")
        .text("{not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());

    server.post("/api/check").await.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_words_merges_dictionary_and_private() {
    let app = TestApp::new();
    let server = app.signed_in("mei").await;
    let cat = add_word(&server, "猫", "māo").await;

    let words = server.get("/api/words").await.json::<Value>();
    let all = ids(&words);
    assert_eq!(&all[..3], &["1", "2", "3"]);
    assert_eq!(all[3], cat["id"].as_str().unwrap());
    assert!(all[3].starts_with("user_"));

    let list = words.as_array().unwrap();
    assert_eq!(list[0]["isUserWord"], false);
    // Dictionary entries come back as stored
    assert_eq!(list[0]["id"], 1);
    assert_eq!(list[0]["hsk_level"], 1);
    assert_eq!(list[1]["id"], "2");
    assert_eq!(list[3]["isUserWord"], true);
}

#[tokio::test]
async fn test_unreadable_accounts_fail_instead_of_anonymous() {
    let app = TestApp::new();
    let mei = app.signed_in("mei").await;
    let bo = app.signed_in("bowen").await;
    add_word(&bo, "秘密", "mì mì").await;

    std::fs::write(paths::users_path(app.temp.path()), "{corrupt").unwrap();

    let response = mei.get("/api/words").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Storage error");

    mei.post("/api/check")
        .json(&json!({ "word_id": 1, "answer": "nǐ hǎo" }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    mei.post("/api/practice")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // Callers without a session are still served
    app.client().get("/api/words").await.assert_status_ok();
}

#[tokio::test]
async fn test_add_word_requires_auth_and_fields() {
    let app = TestApp::new();

    app.client()
        .post("/api/words")
        .json(&json!({ "simplified": "猫", "pinyin": "māo", "translation": "cat" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let server = app.signed_in("mei").await;
    let response = server
        .post("/api/words")
        .json(&json!({ "simplified": "猫", "pinyin": "  ", "translation": "cat" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Field 'pinyin' is required");

    assert_eq!(stats(&server).await["words_added"], 0);
    add_word(&server, "猫", "māo").await;
    assert_eq!(stats(&server).await["words_added"], 1);
}

#[tokio::test]
async fn test_private_words_are_scoped_to_owner() {
    let app = TestApp::new();
    let mei = app.signed_in("mei").await;
    let bo = app.signed_in("bowen").await;

    let cat = add_word(&mei, "猫", "māo").await;
    let cat_id = cat["id"].as_str().unwrap().to_string();

    assert_eq!(ids(&bo.get("/api/words").await.json::<Value>()).len(), 3);

    bo.delete(&format!("/api/words/{}", cat_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    bo.post("/api/check")
        .json(&json!({ "word_id": cat_id, "answer": "māo" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = mei.delete(&format!("/api/words/{}", cat_id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);
    assert_eq!(ids(&mei.get("/api/words").await.json::<Value>()).len(), 3);

    mei.delete(&format!("/api/words/{}", cat_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_visibility_policies() {
    let app = TestApp::new();
    let mei = app.signed_in("mei").await;
    add_word(&mei, "猫", "māo").await;
    assert_eq!(ids(&app.client().get("/api/words").await.json::<Value>()).len(), 4);

    let app = TestApp::with_settings(WordSettings {
        anonymous_visibility: AnonymousVisibility::SharedOnly,
        ..WordSettings::default()
    });
    let mei = app.signed_in("mei").await;
    add_word(&mei, "猫", "māo").await;
    assert_eq!(ids(&app.client().get("/api/words").await.json::<Value>()).len(), 3);
}

#[tokio::test]
async fn test_practice_random_and_requested() {
    let app = TestApp::new();
    let server = app.client();

    let words = server.post("/api/practice").await.json::<Value>();
    let mut got = ids(&words);
    got.sort();
    assert_eq!(got, vec!["1", "2", "3"]);

    let words = server
        .post("/api/practice")
        .json(&json!({ "word_ids": [3, "1", "missing"] }))
        .await
        .json::<Value>();
    let mut got = ids(&words);
    got.sort();
    assert_eq!(got, vec!["1", "3"]);

    let words = server
        .post("/api/practice")
        .json(&json!({ "word_ids": [] }))
        .await
        .json::<Value>();
    assert_eq!(ids(&words).len(), 3);
}

#[tokio::test]
async fn test_check_answer_and_stats() {
    let app = TestApp::new();
    let server = app.signed_in("mei").await;

    let response = server
        .post("/api/check")
        .json(&json!({ "word_id": 2, "answer": "XIÈ XIE" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["correct"], true);
    assert_eq!(body["correct_answer"], "xiè xie");
    assert_eq!(body["word"], "谢谢");
    assert_eq!(body["example"], "谢谢你。");
    assert_eq!(body["isUserWord"], false);

    let body = server
        .post("/api/check")
        .json(&json!({ "word_id": "1", "answer": "ni hao" }))
        .await
        .json::<Value>();
    assert_eq!(body["correct"], false);
    assert_eq!(body["example"], "");

    let current = stats(&server).await;
    assert_eq!(current["total_answers"], 2);
    assert_eq!(current["correct_answers"], 1);

    server
        .post("/api/check")
        .json(&json!({ "word_id": "99", "answer": "x" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(stats(&server).await["total_answers"], 2);

    let response = server
        .post("/api/check")
        .json(&json!({ "answer": "nǐ hǎo" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Word not found");
    server
        .post("/api/check")
        .json(&json!({ "word_id": null, "answer": "nǐ hǎo" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(stats(&server).await["total_answers"], 2);
}

#[tokio::test]
async fn test_anonymous_check_has_no_stats() {
    let app = TestApp::new();
    let anon = app.client();

    let body = anon
        .post("/api/check")
        .json(&json!({ "word_id": 1, "answer": "nǐhǎo" }))
        .await
        .json::<Value>();
    assert_eq!(body["correct"], true);

    anon.get("/api/auth/stats").await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stat_updates() {
    let app = TestApp::new();
    let server = app.signed_in("mei").await;

    let body = server
        .post("/api/auth/stats/update")
        .json(&json!({ "type": "games_played" }))
        .await
        .json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["stats"]["games_played"], 1);

    let body = server
        .post("/api/auth/stats/update")
        .json(&json!({ "type": "games_played", "value": -5 }))
        .await
        .json::<Value>();
    assert_eq!(body["stats"]["games_played"], 0);

    server
        .post("/api/auth/stats/update")
        .json(&json!({ "type": "streak", "value": 1 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body = server.post("/api/game/finish").await.json::<Value>();
    assert_eq!(body["stats"]["games_played"], 1);
    let body = server
        .post("/api/game/finish")
        .json(&json!({ "games_played": 3 }))
        .await
        .json::<Value>();
    assert_eq!(body["stats"]["games_played"], 4);

    app.client()
        .post("/api/game/finish")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
