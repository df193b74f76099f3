use serde::{Deserialize, Serialize};

/// One of the three canonical release-note categories.
///
/// Authors may type either the localized heading (特性 / 优化 / 修复) or the
/// English keyword; both normalize to the same variant. Anything else falls
/// back to `Feature` rather than erroring, so the editor never rejects a
/// heading outright.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Feature,
    Improvement,
    Fix,
}

impl Category {
    /// Normalize a free-form heading label. Case-insensitive, trims
    /// whitespace, never fails: unrecognized labels map to `Feature`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "特性" | "feature" => Self::Feature,
            "优化" | "improvement" => Self::Improvement,
            "修复" | "fix" => Self::Fix,
            _ => Self::Feature,
        }
    }

    /// The display label emitted in serialized markup headings. This is the
    /// exact inverse of [`Category::from_label`] over the localized aliases.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Feature => "特性",
            Self::Improvement => "优化",
            Self::Fix => "修复",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Improvement => "improvement",
            Self::Fix => "fix",
        }
    }
}

/// A single bullet entry in a release note.
///
/// Items own at most one level of child bullets; the parser never produces
/// grandchildren and the serializer never emits indentation past one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ListItem>,
}

/// A named block of release notes under one category heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroup {
    pub id: String,
    pub category: Category,
    pub items: Vec<ListItem>,
}
