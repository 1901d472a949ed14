use chrono::NaiveDate;

/// Builds the frontmatter block for a post and joins it with the body.
///
/// Double quotes inside the title are escaped so the header stays parseable.
pub fn build_post_document(title: &str, date: NaiveDate, body: &str) -> String {
    let escaped = title.replace('"', "\\\"");
    format!(
        "---\ntitle: \"{title}\"\ndate: \"{date}\"\n---\n\n{body}",
        title = escaped,
        date = date.format("%Y-%m-%d"),
        body = body,
    )
}
