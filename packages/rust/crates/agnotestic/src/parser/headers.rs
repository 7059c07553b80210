use serde::{Deserialize, Serialize};

use super::patterns::{HEADER_REGEX, prose_lines};

/// One ATX heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Heading text without the hash markers.
    pub text: String,
}

fn strip_closing_sequence(text: &str) -> &str {
    let stripped = text.trim_end_matches('#');
    if stripped.len() == text.len() {
        return text;
    }
    if stripped.is_empty() || stripped.ends_with([' ', '\t']) {
        stripped.trim_end()
    } else {
        text
    }
}

pub(super) fn extract_headers(text: &str) -> Vec<Header> {
    prose_lines(text)
        .filter_map(|line| {
            let caps = HEADER_REGEX.captures(line)?;
            let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
            let heading = strip_closing_sequence(caps.get(2)?.as_str().trim());
            if heading.is_empty() {
                return None;
            }
            Some(Header {
                level,
                text: heading.to_string(),
            })
        })
        .collect()
}

/// Text of the first level-1 header, or `fallback`.
#[must_use]
pub fn extract_title(headers: &[Header], fallback: &str) -> String {
    headers
        .iter()
        .find(|h| h.level == 1)
        .map_or_else(|| fallback.to_string(), |h| h.text.clone())
}
