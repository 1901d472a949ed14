use std::fmt;

use url::Url;

use crate::types::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository identity and access token. Read-only after validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub base_url: String,
}

impl Credentials {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

// The token must never reach logs or debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Checks that all identity fields are present. Pure; runs before any
/// network call.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ConfigError> {
    if credentials.token.is_empty() {
        return Err(ConfigError::MissingToken);
    }
    if credentials.owner.is_empty() {
        return Err(ConfigError::MissingOwner);
    }
    if credentials.repo.is_empty() {
        return Err(ConfigError::MissingRepo);
    }
    Ok(())
}

/// Owner/repository pair parsed from a user-entered reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

/// Parses a repository reference.
///
/// Accepts `https://github.com/owner/repo[...]`, `github.com/owner/repo[...]`
/// and the bare `owner/repo` form. The bare form must be exactly two
/// segments of repository-name characters; arbitrary slashed text is
/// rejected rather than guessed at.
pub fn parse_repo_url(input: &str) -> Result<RepoRef, ConfigError> {
    let input = input.trim();
    let invalid = || ConfigError::InvalidRepoRef(input.to_string());
    if input.is_empty() {
        return Err(invalid());
    }

    let absolute = if input.starts_with("http://") || input.starts_with("https://") {
        Some(input.to_string())
    } else if input.starts_with("github.com/") {
        Some(format!("https://{input}"))
    } else {
        None
    };

    if let Some(absolute) = absolute {
        let url = Url::parse(&absolute).map_err(|_| invalid())?;
        if url.host_str() != Some("github.com") {
            return Err(invalid());
        }
        let mut segments = url.path_segments().ok_or_else(invalid)?.filter(|s| !s.is_empty());
        return match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => Ok(RepoRef {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(invalid()),
        };
    }

    let mut segments = input.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(owner), Some(repo), None) if is_name_segment(owner) && is_name_segment(repo) => {
            Ok(RepoRef {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })
        }
        _ => Err(invalid()),
    }
}

fn is_name_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
