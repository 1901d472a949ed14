use std::time::Duration;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use publisher_engine::{
    create_post_at, from_base64, ApiFailure, ClientSettings, Credentials, GitHubClient,
    PostOptions, RepositoryClient,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials_for(server: &MockServer) -> Credentials {
    let mut credentials = Credentials::new("test-token", "octo", "blog");
    credentials.base_url = server.uri();
    credentials
}

fn created_body(path: &str) -> serde_json::Value {
    json!({
        "content": {
            "html_url": format!("https://github.com/octo/blog/blob/main/{path}")
        },
        "commit": {
            "sha": "abc123"
        }
    })
}

#[tokio::test]
async fn test_connection_returns_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", "token test-token"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    let identity = client.test_connection().await.expect("identity");
    assert_eq!(identity.login, "octocat");
}

#[tokio::test]
async fn invalid_token_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    let err = client.test_connection().await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::Authentication);
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Bad credentials");
    assert!(err.raw_body.unwrap().contains("Bad credentials"));
}

#[tokio::test]
async fn create_file_decodes_success_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/hello.md"))
        .and(header("Authorization", "token test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_body("posts/hello.md")))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    let post = client
        .create_file("posts/hello.md", "SGVsbG8=", "Add post: Hello")
        .await
        .expect("created");
    assert_eq!(
        post.html_url,
        "https://github.com/octo/blog/blob/main/posts/hello.md"
    );
    assert_eq!(post.commit_sha, "abc123");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(
        body,
        json!({"message": "Add post: Hello", "content": "SGVsbG8="})
    );
}

#[tokio::test]
async fn existing_path_maps_to_conflict_and_is_never_overwritten() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/taken.md"))
        .respond_with(ResponseTemplate::new(422).set_body_json(
            json!({"message": "Invalid request.\n\n\"sha\" wasn't supplied."}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/raced.md"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "Conflict"})))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");

    let err = client
        .create_file("posts/taken.md", "SGVsbG8=", "Add post: Taken")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::Conflict);
    assert_eq!(err.status, Some(422));

    let err = client
        .create_file("posts/raced.md", "SGVsbG8=", "Add post: Raced")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::Conflict);
    assert_eq!(err.status, Some(409));

    // Create-only contract: the request can never carry a `sha`, so the
    // remote refuses to replace the existing content.
    let requests = server.received_requests().await.expect("requests");
    for request in requests {
        let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
        assert!(body.get("sha").is_none());
    }
}

#[tokio::test]
async fn missing_repository_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/hello.md"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    let err = client
        .create_file("posts/hello.md", "SGVsbG8=", "Add post: Hello")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::NotFound);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn other_statuses_carry_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/a.md"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/b.md"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");

    let err = client
        .create_file("posts/a.md", "SGVsbG8=", "Add post: A")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::Api);
    assert_eq!(err.message, "boom");

    // Unparseable body falls back to the operation's message.
    let err = client
        .create_file("posts/b.md", "SGVsbG8=", "Add post: B")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::Api);
    assert_eq!(err.message, "failed to create file");
    assert_eq!(err.raw_body.as_deref(), Some("<html>oops</html>"));
}

#[tokio::test]
async fn unreachable_host_maps_to_network_error() {
    let mut credentials = Credentials::new("test-token", "octo", "blog");
    // Discard port; nothing listens there.
    credentials.base_url = "http://127.0.0.1:9".to_string();
    let settings = ClientSettings {
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
    };
    let client = GitHubClient::with_settings(credentials, settings).expect("client");

    let err = client.test_connection().await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::Network);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn file_exists_reports_and_degrades_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/blog/contents/posts/present.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "present.md"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/blog/contents/posts/absent.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    assert!(client.file_exists("posts/present.md").await);
    assert!(!client.file_exists("posts/absent.md").await);

    let mut dead = Credentials::new("test-token", "octo", "blog");
    dead.base_url = "http://127.0.0.1:9".to_string();
    let settings = ClientSettings {
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
    };
    let client = GitHubClient::with_settings(dead, settings).expect("client");
    assert!(!client.file_exists("posts/present.md").await);
}

#[tokio::test]
async fn create_post_builds_frontmatter_filename_and_commit_message() {
    let server = MockServer::start().await;
    let expected = "/repos/octo/blog/contents/posts/2024-12-30-the-big-idea.md";
    Mock::given(method("PUT"))
        .and(path(expected))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(created_body("posts/2024-12-30-the-big-idea.md")),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    let now = Utc.with_ymd_and_hms(2024, 12, 30, 10, 0, 0).unwrap();
    create_post_at(
        &client,
        "The \"Big\" Idea",
        "Body line.\n",
        &PostOptions::default(),
        now,
    )
    .await
    .expect("published");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["message"], "Add post: The \"Big\" Idea");
    let document = from_base64(body["content"].as_str().unwrap()).expect("valid base64");
    assert_eq!(
        document,
        "---\ntitle: \"The \\\"Big\\\" Idea\"\ndate: \"2024-12-30\"\n---\n\nBody line.\n"
    );
}

#[tokio::test]
async fn explicit_filename_wins_over_slug() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/blog/contents/posts/custom.md"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_body("posts/custom.md")))
        .mount(&server)
        .await;

    let client = GitHubClient::new(credentials_for(&server)).expect("client");
    let options = PostOptions {
        filename: Some("custom.md".to_string()),
        ..PostOptions::default()
    };
    let now = Utc.with_ymd_and_hms(2024, 12, 30, 10, 0, 0).unwrap();
    let post = create_post_at(&client, "Ignored Title", "body", &options, now)
        .await
        .expect("published");
    assert_eq!(
        post.html_url,
        "https://github.com/octo/blog/blob/main/posts/custom.md"
    );
}
