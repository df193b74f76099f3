//! The constrained release-note markup format.
//!
//! Authors write release notes in a two-level bullet syntax:
//!
//! ```text
//! ## 特性          (or: ## feature / ## improvement / ## fix)
//! - top-level item
//!   - nested item (2-space indent)
//! ```
//!
//! [`parse`] turns that text into ordered [`UpdateGroup`]s and [`serialize`]
//! is its structural inverse. Both are total: malformed lines are silently
//! dropped, unknown headings fall back to the `feature` category, and an
//! all-empty input parses to a single blank feature item so the editor
//! always has something to render.

mod inline;

pub use inline::{split_inline, InlineSegment};

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::models::{Category, ListItem, UpdateGroup};

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(.+)$").unwrap());

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)[-*]\s+(.+)$").unwrap());

/// Parse markup text into ordered update groups.
///
/// Rules, per line (trailing whitespace stripped, leading kept):
/// - `## <label>` starts a new group; a previously open group is kept only
///   if it accumulated at least one item, so consecutive headings collapse
///   to the last one.
/// - A bullet (`-` or `*` plus a space) indented by fewer than 2 characters
///   is a top-level item of the open group; with no open group the line is
///   dropped.
/// - A bullet indented by 2 or more characters becomes a child of the most
///   recent top-level item; with no such item the line is dropped.
/// - Anything else is ignored. The format has no prose support.
///
/// An input that produces no groups at all yields one synthetic `feature`
/// group holding a single empty item.
pub fn parse(markup: &str) -> Vec<UpdateGroup> {
    let mut groups: Vec<UpdateGroup> = Vec::new();
    let mut current_group: Option<UpdateGroup> = None;

    for line in markup.lines() {
        let line = line.trim_end();

        if let Some(caps) = HEADING_RE.captures(line) {
            if let Some(group) = current_group.take() {
                if !group.items.is_empty() {
                    groups.push(group);
                }
            }
            current_group = Some(UpdateGroup {
                id: new_id(),
                category: Category::from_label(&caps[1]),
                items: Vec::new(),
            });
            continue;
        }

        let Some(caps) = BULLET_RE.captures(line) else {
            continue;
        };
        let indent = caps[1].len();
        let text = caps[2].trim().to_string();

        if indent < 2 {
            if let Some(group) = current_group.as_mut() {
                group.items.push(ListItem {
                    id: new_id(),
                    text,
                    children: Vec::new(),
                });
            }
        } else if let Some(item) = current_group
            .as_mut()
            .and_then(|g| g.items.last_mut())
        {
            item.children.push(ListItem {
                id: new_id(),
                text,
                children: Vec::new(),
            });
        }
    }

    if let Some(group) = current_group {
        if !group.items.is_empty() {
            groups.push(group);
        }
    }

    if groups.is_empty() {
        groups.push(UpdateGroup {
            id: new_id(),
            category: Category::Feature,
            items: vec![ListItem {
                id: new_id(),
                text: String::new(),
                children: Vec::new(),
            }],
        });
    }

    groups
}

/// Serialize update groups back into canonical markup.
///
/// Groups without items are skipped. Output uses the localized display
/// labels, `- ` bullets, and a fixed 2-space indent for children, so
/// `parse(serialize(d))` reproduces `d` structurally for any `d` that came
/// out of [`parse`]. Raw input formatting is not preserved.
pub fn serialize(groups: &[UpdateGroup]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for group in groups {
        if group.items.is_empty() {
            continue;
        }

        lines.push(format!("## {}", group.category.display_label()));
        lines.push(String::new());

        for item in &group.items {
            lines.push(format!("- {}", item.text));
            for child in &item.children {
                lines.push(format!("  - {}", child.text));
            }
        }

        lines.push(String::new());
    }

    lines.join("\n").trim().to_string()
}

/// Identifier for a group or item, unique within one parse call.
fn new_id() -> String {
    Uuid::new_v4().to_string()
}
