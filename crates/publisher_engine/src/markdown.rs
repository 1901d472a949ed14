/// Extracts a fallback title from markdown content.
///
/// The first `#` or `##` heading line wins, whichever level appears first in
/// document order. Deeper headings and `#` without a following space are
/// ignored, as are headings with only whitespace after the marker.
pub fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| heading_text(line.trim()))
        .next()
        .map(ToOwned::to_owned)
}

fn heading_text(line: &str) -> Option<&str> {
    let body = if let Some(rest) = line.strip_prefix("##") {
        rest
    } else {
        line.strip_prefix('#')?
    };
    if body.starts_with('#') || !body.starts_with(char::is_whitespace) {
        return None;
    }
    let text = body.trim();
    (!text.is_empty()).then_some(text)
}
