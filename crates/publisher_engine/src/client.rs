use std::time::Duration;

use publisher_logging::publish_debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::repo::{validate_credentials, Credentials};
use crate::types::{ApiError, ConfigError, PublishedPost, UserIdentity};

const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Remote content-addressed repository: connectivity probe, existence check
/// and create-only file commits.
#[async_trait::async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Probes authentication against the identity endpoint.
    async fn test_connection(&self) -> Result<UserIdentity, ApiError>;

    /// Advisory existence check; any failure collapses to `false`.
    async fn file_exists(&self, path: &str) -> bool;

    /// Creates a file at `path`. The call is create-only: the remote rejects
    /// it when the path already exists.
    async fn create_file(
        &self,
        path: &str,
        base64_content: &str,
        commit_message: &str,
    ) -> Result<PublishedPost, ApiError>;
}

/// [`RepositoryClient`] backed by the GitHub REST v3 contents API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    credentials: Credentials,
    http: reqwest::Client,
}

impl GitHubClient {
    /// Builds a client with default timeouts. Fails fast on incomplete
    /// credentials, before any network traffic.
    pub fn new(credentials: Credentials) -> Result<Self, ConfigError> {
        Self::with_settings(credentials, ClientSettings::default())
    }

    pub fn with_settings(
        credentials: Credentials,
        settings: ClientSettings,
    ) -> Result<Self, ConfigError> {
        validate_credentials(&credentials)?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self { credentials, http })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.credentials.base_url, self.credentials.owner, self.credentials.repo, path
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(AUTHORIZATION, format!("token {}", self.credentials.token))
            .header(ACCEPT, GITHUB_V3_ACCEPT)
    }
}

#[async_trait::async_trait]
impl RepositoryClient for GitHubClient {
    async fn test_connection(&self) -> Result<UserIdentity, ApiError> {
        let url = format!("{}/user", self.credentials.base_url);
        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(ApiError::from_response(
                status.as_u16(),
                &body,
                "authentication failed; check the access token",
            ));
        }
        serde_json::from_str(&body).map_err(|_| ApiError::unexpected_body(status.as_u16(), &body))
    }

    async fn file_exists(&self, path: &str) -> bool {
        let request = self.authorized(self.http.get(&self.contents_url(path)));
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn create_file(
        &self,
        path: &str,
        base64_content: &str,
        commit_message: &str,
    ) -> Result<PublishedPost, ApiError> {
        publish_debug!(
            "Creating {} in {}/{}",
            path,
            self.credentials.owner,
            self.credentials.repo
        );
        // No `sha` field: this is a create, and the remote must reject an
        // existing path instead of overwriting it.
        let payload = serde_json::json!({
            "message": commit_message,
            "content": base64_content,
        });
        let response = self
            .authorized(self.http.put(&self.contents_url(path)))
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(ApiError::from_response(
                status.as_u16(),
                &body,
                "failed to create file",
            ));
        }
        let decoded: ContentsResponse = serde_json::from_str(&body)
            .map_err(|_| ApiError::unexpected_body(status.as_u16(), &body))?;
        Ok(PublishedPost {
            html_url: decoded.content.html_url,
            commit_sha: decoded.commit.sha,
        })
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::network(format!("request timed out: {err}"));
    }
    ApiError::network(err.to_string())
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: ContentPayload,
    commit: CommitPayload,
}

#[derive(Debug, Deserialize)]
struct ContentPayload {
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    sha: String,
}
