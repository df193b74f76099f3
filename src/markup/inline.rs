use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// A piece of item text after inline image tokens are split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSegment {
    Text(String),
    Image { alt: String, url: String },
}

/// Split item text into literal-text and image-reference segments.
///
/// Scans left to right for `![alt](url)` tokens (alt may not contain `]`,
/// url may not contain `)`), non-overlapping, first match wins. Text with
/// no tokens comes back as a single `Text` segment; empty input yields no
/// segments at all, which renderers treat as nothing to draw.
pub fn split_inline(text: &str) -> Vec<InlineSegment> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in IMAGE_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last_end {
            segments.push(InlineSegment::Text(text[last_end..whole.start()].to_string()));
        }
        segments.push(InlineSegment::Image {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
        });
        last_end = whole.end();
    }

    if last_end < text.len() {
        segments.push(InlineSegment::Text(text[last_end..].to_string()));
    }

    segments
}
