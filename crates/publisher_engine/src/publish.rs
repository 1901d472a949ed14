use chrono::{DateTime, Utc};

use crate::client::RepositoryClient;
use crate::encoding;
use crate::frontmatter::build_post_document;
use crate::markdown::extract_title;
use crate::slug::{generate_filename_at, SlugOptions};
use crate::types::{ApiError, PublishError, PublishedPost, ValidationError};

/// Where and how a post lands in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOptions {
    pub directory: String,
    pub date_prefix: bool,
    /// Explicit filename; wins over the generated slug when set.
    pub filename: Option<String>,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            directory: "posts".to_string(),
            date_prefix: true,
            filename: None,
        }
    }
}

/// One publish attempt. Immutable once handed to [`publish_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: String,
    pub options: PostOptions,
}

/// Commits a post with frontmatter to the repository.
///
/// The commit message is always `Add post: <title>`.
pub async fn create_post(
    client: &dyn RepositoryClient,
    title: &str,
    content: &str,
    options: &PostOptions,
) -> Result<PublishedPost, ApiError> {
    create_post_at(client, title, content, options, Utc::now()).await
}

/// Deterministic variant of [`create_post`] with the instant supplied by the
/// caller; the instant feeds the frontmatter date and the slug date prefix.
pub async fn create_post_at(
    client: &dyn RepositoryClient,
    title: &str,
    content: &str,
    options: &PostOptions,
    now: DateTime<Utc>,
) -> Result<PublishedPost, ApiError> {
    let document = build_post_document(title, now.date_naive(), content);
    let encoded = encoding::to_base64(&document);

    let filename = options.filename.clone().unwrap_or_else(|| {
        let slug_options = SlugOptions {
            date_prefix: options.date_prefix,
            ..SlugOptions::default()
        };
        generate_filename_at(title, &slug_options, now)
    });
    let path = if options.directory.is_empty() {
        filename
    } else {
        format!("{}/{}", options.directory, filename)
    };

    let message = format!("Add post: {title}");
    client.create_file(&path, &encoded, &message).await
}

/// Validates a draft and publishes it.
///
/// A missing title falls back to the first markdown heading in the content.
/// Validation failures are returned before any network call; nothing is ever
/// retried.
pub async fn publish_draft(
    client: &dyn RepositoryClient,
    draft: &PostDraft,
) -> Result<PublishedPost, PublishError> {
    publish_draft_at(client, draft, Utc::now()).await
}

pub async fn publish_draft_at(
    client: &dyn RepositoryClient,
    draft: &PostDraft,
    now: DateTime<Utc>,
) -> Result<PublishedPost, PublishError> {
    if draft.content.is_empty() {
        return Err(ValidationError::MissingContent.into());
    }
    let title = match draft.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => extract_title(&draft.content).ok_or(ValidationError::MissingTitle)?,
    };
    Ok(create_post_at(client, &title, &draft.content, &draft.options, now).await?)
}
