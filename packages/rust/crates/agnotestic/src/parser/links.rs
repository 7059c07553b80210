use serde::{Deserialize, Serialize};

use super::patterns::{LINK_REGEX, prose_lines};

/// Link syntax a reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `[label](target)`
    Markdown,
    /// `[[target]]` or `[[target|label]]`
    Wiki,
}

/// One outgoing reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Visible text.
    pub label: String,
    /// Destination as written (URL, relative path, or note name).
    pub target: String,
    /// Syntax used.
    pub kind: LinkKind,
}

// Supports `<path with spaces.md>` and `path.md "title"`.
fn markdown_target(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let target = if let Some(rest) = trimmed.strip_prefix('<') {
        &rest[..rest.find('>')?]
    } else {
        trimmed.split_whitespace().next()?
    };
    let target = target.trim();
    (!target.is_empty()).then_some(target)
}

fn wiki_link(inner: &str) -> Option<Link> {
    let (target, label) = match inner.split_once('|') {
        Some((target, label)) => (target.trim(), label.trim()),
        None => (inner.trim(), inner.trim()),
    };
    if target.is_empty() {
        return None;
    }
    let label = if label.is_empty() { target } else { label };
    Some(Link {
        label: label.to_string(),
        target: target.to_string(),
        kind: LinkKind::Wiki,
    })
}

pub(super) fn extract_links(text: &str) -> Vec<Link> {
    let mut out = Vec::new();
    for line in prose_lines(text) {
        for caps in LINK_REGEX.captures_iter(line) {
            if let Some(inner) = caps.get(1) {
                out.extend(wiki_link(inner.as_str()));
                continue;
            }
            let (Some(label), Some(target)) = (caps.get(2), caps.get(3)) else {
                continue;
            };
            let Some(target) = markdown_target(target.as_str()) else {
                continue;
            };
            out.push(Link {
                label: label.as_str().trim().to_string(),
                target: target.to_string(),
                kind: LinkKind::Markdown,
            });
        }
    }
    out
}
