use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use roster_rest_api::{create_rest_app, AppConfig, AppContext};
use roster_api_types::Vote;
use roster_storage::{InMemoryRepositoryFactory, InMemoryStore};

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    fn with_store(store: InMemoryStore) -> Self {
        let context = AppContext::new(Arc::new(InMemoryRepositoryFactory::new(store)));
        Self {
            router: create_rest_app(context, AppConfig::default()),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn create_user(&self, first_name: &str, last_name: &str) -> Value {
        let (status, body) = self
            .send(Method::POST, "/api/v1/users", Some(person(first_name, last_name)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }
}

fn person(first_name: &str, last_name: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": format!("{}.{}@Example.com", first_name.trim(), last_name.trim()),
        "gender": "Female",
        "date_of_birth": "1990-05-17",
        "country_of_birth": "united kingdom"
    })
}

fn names(users: &Value) -> Vec<String> {
    users
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["first_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_index_and_health() {
    let app = TestApp::new();

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apis"], json!(["/api/v1/users", "/api/v1/comments", "/api/v1/votes"]));
    assert_eq!(body["fake_data"], "/data");

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_load_fake_data() {
    let app = TestApp::new();

    let (status, body) = app.get("/data?quantity=5").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["detail"], "Data loaded");
    assert_eq!(body["home"], "/");
    assert_eq!(body["people"], 5);

    let (status, body) = app.get("/api/v1/users?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], "/api/v1/users?limit=2&offset=2");

    let (status, body) = app.get("/data?quantity=10001").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("at most 10000"));
}

#[tokio::test]
async fn test_create_user_normalizes_and_validates() {
    let app = TestApp::new();

    let user = app.create_user("  ada ", "LOVELACE").await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["first_name"], "Ada");
    assert_eq!(user["last_name"], "Lovelace");
    assert_eq!(user["email"], "ada.lovelace@example.com");
    assert_eq!(user["country_of_birth"], "United Kingdom");
    assert_eq!(user["is_admin"], false);

    let (status, body) = app
        .send(Method::POST, "/api/v1/users", Some(person("Al", "Turing")))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "first_name");

    let mut invalid_email = person("Alan", "Turing");
    invalid_email["email"] = json!("not-an-email");
    let (status, body) = app.send(Method::POST, "/api/v1/users", Some(invalid_email)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["message"], "email is not a valid email address.");
}

#[tokio::test]
async fn test_list_users_sorting_and_links() {
    let app = TestApp::new();
    for (first, last) in [("John", "Doe"), ("Mary", "Shelley"), ("Alan", "Turing"), ("Grace", "Hopper")] {
        app.create_user(first, last).await;
    }

    let (status, body) = app.get("/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["John", "Mary", "Alan", "Grace"]);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], Value::Null);

    let (status, body) = app.get("/api/v1/users?limit=2&offset=2&sort=first_name:desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["Grace", "Alan"]);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], "/api/v1/users?limit=2&offset=0");
}

#[tokio::test]
async fn test_list_users_rejects_bad_parameters() {
    let app = TestApp::new();
    app.create_user("John", "Doe").await;

    let (status, body) = app.get("/api/v1/users?sort=height:asc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SORT");

    let (status, body) = app.get("/api/v1/users?sort=first_name").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SORT");

    let (status, body) = app.get("/api/v1/users?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid values: offset(>=0) or limit(>0)"));

    // a bad sort is reported before a bad window
    let (_, body) = app.get("/api/v1/users?limit=-1&sort=nope:asc").await;
    assert_eq!(body["error"]["code"], "INVALID_SORT");

    let (status, body) = app.get("/api/v1/users?offset=10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Not Found");
}

#[tokio::test]
async fn test_get_patch_replace_and_delete_user() {
    let app = TestApp::new();
    app.create_user("John", "Doe").await;

    let (status, body) = app.get("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["first_name"], "John");

    let (status, body) = app.get("/api/v1/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User with ID 42 doesn't exist");

    let (status, body) = app
        .send(Method::PATCH, "/api/v1/users/1", Some(json!({"job": "Engineer", "last_name": "smith"})))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["job"], "Engineer");
    assert_eq!(body["last_name"], "Smith");
    assert_eq!(body["first_name"], "John");

    let (status, body) = app
        .send(Method::PATCH, "/api/v1/users/1", Some(json!({"job": null})))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["job"], Value::Null);
    assert_eq!(body["last_name"], "Smith");

    let (status, body) = app
        .send(Method::PUT, "/api/v1/users/1", Some(person("Mary", "Shelley")))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["first_name"], "Mary");
    assert_eq!(body["job"], Value::Null);

    let (status, _) = app
        .send(Method::PUT, "/api/v1/users/7", Some(person("Mary", "Shelley")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::DELETE, "/api/v1/users/1", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["detail"], "User 1 delete successfully");

    let (status, _) = app.send(Method::DELETE, "/api/v1/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/api/v1/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_filter_users() {
    let app = TestApp::new();
    for (first, last) in [("John", "Doe"), ("Mary", "Johnson"), ("Alan", "Turing")] {
        app.create_user(first, last).await;
    }

    let (status, body) = app.get("/api/v1/users/filter/first_nameOrlast_name/john").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(names(&body["users"]), vec!["John", "Mary"]);

    let (status, body) = app.get("/api/v1/users/filter/height/tall").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FILTER");

    let (status, body) = app.get("/api/v1/users/filter/last_name/zzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Not Found");
}

#[tokio::test]
async fn test_comments_and_votes() {
    let app = TestApp::new();
    app.create_user("John", "Doe").await;
    app.create_user("Mary", "Shelley").await;

    let (status, body) = app
        .send(Method::POST, "/api/v1/comments", Some(json!({"user_id": 99, "content": "hello"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Person with ID 99 doesn't exist");

    let (status, comment) = app
        .send(
            Method::POST,
            "/api/v1/comments",
            Some(json!({"user_id": 1, "content": "  First post  "})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["content"], "First post");

    let (status, _) = app
        .send(Method::POST, "/api/v1/comments", Some(json!({"user_id": 1, "content": "   "})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app.get("/api/v1/comments?sort=user_id:desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/v1/comments/user/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"][0]["id"], comment["id"]);

    let (status, _) = app.get("/api/v1/comments/user/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/api/v1/comments/filter/content/POST").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(Method::PATCH, "/api/v1/comments/1", Some(json!({"content": "Edited"})))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["content"], "Edited");
    assert_eq!(body["added"], comment["added"]);

    let (status, vote) = app
        .send(Method::POST, "/api/v1/votes", Some(json!({"comment_id": 1, "user_id": 2})))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/v1/votes/comment/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"][0]["id"], vote["id"]);

    let (status, body) = app.get("/api/v1/votes?sort=comment_id:asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"].as_array().unwrap().len(), 1);

    // deleting the author cascades to the comment and its votes
    let (status, _) = app.send(Method::DELETE, "/api/v1/users/1", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = app.get("/api/v1/comments/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/api/v1/votes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_comments_by_owner() {
    let app = TestApp::new();
    app.create_user("John", "Doe").await;
    app.create_user("Mary", "Shelley").await;

    for (user_id, content) in [(1, "Hello"), (2, "Frankenstein"), (1, "Again")] {
        let (status, _) = app
            .send(Method::POST, "/api/v1/comments", Some(json!({"user_id": user_id, "content": content})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/v1/comments/filter/user_id/1").await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<_> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|comment| comment["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["Hello", "Again"]);

    let (status, body) = app.get("/api/v1/comments/filter/user_idOrcontent/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"][0]["content"], "Frankenstein");

    // the declared field name is not part of the API
    let (status, body) = app.get("/api/v1/comments/filter/user/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FILTER");
    assert_eq!(
        body["error"]["message"],
        "Invalid attribute filter 'user'. Try with: user_id, added, edited, content"
    );

    let (status, _) = app.get("/api/v1/votes?sort=user_id:desc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/api/v1/votes?sort=voter:desc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v2/users").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_custom_prefix() {
    let context = AppContext::new(Arc::new(InMemoryRepositoryFactory::default()));
    let config = AppConfig {
        api_prefix: "/roster/".to_string(),
        ..AppConfig::default()
    };
    let router = create_rest_app(context, config);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["apis"][0], "/roster/users");

    // routed, but the store is empty
    let request = Request::builder().uri("/roster/users").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["message"], "Not Found");
}

#[tokio::test]
async fn test_health_reports_broken_storage() {
    let store = InMemoryStore::new();
    let app = TestApp::with_store(store.clone());
    app.create_user("John", "Smith").await;

    {
        let mut tables = store.write().await;
        let id = tables.allocate_vote_id();
        tables.votes.insert(
            id,
            Vote {
                id,
                comment_id: 42,
                user_id: 1,
            },
        );
    }

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["storage"]["status"], "unhealthy");
    assert!(body["checks"]["storage"]["message"]
        .as_str()
        .unwrap()
        .contains("references missing comment 42"));
}
