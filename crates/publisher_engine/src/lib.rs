//! Publisher engine: markdown post pipeline and GitHub API client.
mod encoding;
mod slug;
mod markdown;
mod frontmatter;
mod repo;
mod client;
mod publish;
mod engine;
mod types;

pub use client::{ClientSettings, GitHubClient, RepositoryClient};
pub use encoding::{from_base64, is_valid_base64, to_base64, EncodingError};
pub use engine::EngineHandle;
pub use frontmatter::build_post_document;
pub use markdown::extract_title;
pub use publish::{
    create_post, create_post_at, publish_draft, publish_draft_at, PostDraft, PostOptions,
};
pub use repo::{parse_repo_url, validate_credentials, Credentials, RepoRef, DEFAULT_API_BASE};
pub use slug::{
    generate_filename, generate_filename_at, generate_slug, generate_slug_at, SlugOptions,
};
pub use types::{
    ApiError, ApiFailure, ConfigError, EngineEvent, PublishError, PublishedPost, UserIdentity,
    ValidationError,
};
