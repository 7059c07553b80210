use std::collections::HashSet;

use super::patterns::{TAG_REGEX, prose_lines};

/// Inline `#tags`, leading `#` kept, deduplicated in first-seen order.
pub(super) fn extract_tags(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for line in prose_lines(text) {
        for caps in TAG_REGEX.captures_iter(line) {
            let Some(tag) = caps.get(1) else {
                continue;
            };
            // `[label](#anchor)` is a link fragment.
            if line[..tag.start()].ends_with("](") {
                continue;
            }
            // Sentence punctuation is not part of the tag.
            let tag = tag.as_str().trim_end_matches('.');
            if tag.len() <= 1 {
                continue;
            }
            if seen.insert(tag.to_string()) {
                out.push(tag.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_tags() {
        let tags = extract_tags("#rust and #zettel-kasten, also #rust again.\nEnds with #v1.2.");
        assert_eq!(tags, vec!["#rust", "#zettel-kasten", "#v1.2"]);
    }

    #[test]
    fn test_headers_urls_and_anchors_are_not_tags() {
        let text = "# Title\n## Sub\nhttps://example.com/page#anchor [x](#local) &#123;\n";
        assert!(extract_tags(text).is_empty());
    }

    #[test]
    fn test_parenthesized_tags() {
        let tags = extract_tags("Topics (#rust, #go) here, see [intro](#setup).\n(#zettel)\n");
        assert_eq!(tags, vec!["#rust", "#go", "#zettel"]);
    }

    #[test]
    fn test_glued_tags_keep_only_the_first() {
        assert_eq!(extract_tags("#rust#go"), vec!["#rust"]);
    }

    #[test]
    fn test_tags_in_code_are_ignored() {
        let text = "```c\n#include <stdio.h>\n```\n#real\n";
        assert_eq!(extract_tags(text), vec!["#real"]);
    }
}
