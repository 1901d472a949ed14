use chrono::{DateTime, Utc};

/// Options controlling slug shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugOptions {
    pub date_prefix: bool,
    pub separator: char,
    pub max_length: usize,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            date_prefix: false,
            separator: '-',
            max_length: 200,
        }
    }
}

/// Derives a URL- and filesystem-safe slug from a title.
///
/// CJK characters are preserved verbatim since the repository host accepts
/// them in paths; every run of other non-word characters becomes one
/// separator. Never returns an empty string.
pub fn generate_slug(title: &str, options: &SlugOptions) -> String {
    generate_slug_at(title, options, Utc::now())
}

/// Deterministic variant of [`generate_slug`] with the instant supplied by
/// the caller. Identical title, options and instant give identical output.
pub fn generate_slug_at(title: &str, options: &SlugOptions, now: DateTime<Utc>) -> String {
    let separator = options.separator;
    let lowered = title.to_lowercase();

    // Replace every run of characters outside the keep set with one separator.
    let mut replaced = String::with_capacity(lowered.len());
    let mut in_run = false;
    for c in lowered.chars() {
        if is_slug_char(c) {
            replaced.push(c);
            in_run = false;
        } else if !in_run {
            replaced.push(separator);
            in_run = true;
        }
    }

    // Collapse consecutive separators, literal ones in the title included.
    let mut collapsed = String::with_capacity(replaced.len());
    let mut prev_separator = false;
    for c in replaced.chars() {
        if c == separator {
            if !prev_separator {
                collapsed.push(c);
            }
            prev_separator = true;
        } else {
            collapsed.push(c);
            prev_separator = false;
        }
    }
    let mut slug = collapsed.trim_matches(separator).to_string();

    if options.date_prefix {
        let date = now.format("%Y-%m-%d");
        slug = if slug.is_empty() {
            date.to_string()
        } else {
            format!("{date}{separator}{slug}")
        };
    }

    // Character count, not bytes: truncation must never split a multi-byte
    // character.
    if slug.chars().count() > options.max_length {
        slug = slug.chars().take(options.max_length).collect();
    }
    while slug.ends_with(separator) {
        slug.pop();
    }

    if slug.is_empty() {
        slug = format!("untitled-{}", now.timestamp_millis());
    }
    slug
}

/// Complete markdown filename for a title: the slug plus `.md`.
pub fn generate_filename(title: &str, options: &SlugOptions) -> String {
    format!("{}.md", generate_slug(title, options))
}

pub fn generate_filename_at(title: &str, options: &SlugOptions, now: DateTime<Utc>) -> String {
    format!("{}.md", generate_slug_at(title, options, now))
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || is_cjk(c)
}

// Explicit code-point ranges; no locale-dependent classification.
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4e00}'..='\u{9fa5}' | '\u{3000}'..='\u{303f}' | '\u{ff00}'..='\u{ffef}'
    )
}
