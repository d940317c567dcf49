//! The two interchangeable shapes of a deck outline.
//!
//! A flat outline is a sequence of pages; a sectioned outline is a sequence
//! of named parts, each holding its own pages. One outline instance uses
//! exactly one shape (the model is instructed to never mix them), but this
//! crate treats outlines as pass-through data and renders whatever it is
//! given without validation.

use serde::{Deserialize, Serialize};

/// A single page of the outline: a title plus its bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePage {
    /// Page title.
    pub title: String,
    /// Bullet points, in display order.
    pub points: Vec<String>,
}

impl OutlinePage {
    /// Create a page from a title and its points.
    pub fn new(title: impl Into<String>, points: Vec<String>) -> Self {
        Self {
            title: title.into(),
            points,
        }
    }
}

/// One top-level outline entry, in either of the two permissible shapes.
///
/// The `untagged` representation keeps the JSON exactly as the model emits
/// it: `{"part": ..., "pages": [...]}` for a section, `{"title": ...,
/// "points": [...]}` for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutlineEntry {
    /// A named section containing an ordered list of pages.
    Part {
        /// Section label (e.g. "Part 1: Introduction").
        part: String,
        /// Pages belonging to this section.
        pages: Vec<OutlinePage>,
    },
    /// A standalone page in a flat outline.
    Page(OutlinePage),
}

/// Serialize an outline to pretty-printed JSON for embedding into a prompt.
///
/// Non-ASCII characters are preserved literally, so outlines in any language
/// read back to the model exactly as generated.
pub fn outline_to_json(outline: &[OutlineEntry]) -> String {
    serde_json::to_string_pretty(outline).unwrap_or_default()
}

/// Serialize a single page to pretty-printed JSON for embedding into a prompt.
pub fn page_to_json(page: &OutlinePage) -> String {
    serde_json::to_string_pretty(page).unwrap_or_default()
}

const SIMPLE_FORMAT_EXAMPLE: &str = r#"[{"title": "title1", "points": ["point1", "point2"]}, {"title": "title2", "points": ["point1", "point2"]}]"#;

const PART_FORMAT_EXAMPLE_BODY: &str = r#"[
    {
    "part": "Part 1: Introduction",
    "pages": [
        {"title": "Welcome", "points": ["point1", "point2"]},
        {"title": "Overview", "points": ["point1", "point2"]}
    ]
    },
    {
    "part": "Part 2: Main Content",
    "pages": [
        {"title": "Topic 1", "points": ["point1", "point2"]},
        {"title": "Topic 2", "points": ["point1", "point2"]}
    ]
    }"#;

/// The canonical description of the two permissible output formats, embedded
/// verbatim in every outline-producing stage instruction.
///
/// `open_ended` appends the continuation marker inside the part-based
/// example, for stages that invite the model to add as many parts as the
/// content needs.
pub fn format_options(open_ended: bool) -> String {
    let part_tail = if open_ended {
        ",\n    ... (as many parts as needed)\n]"
    } else {
        "\n]"
    };
    format!(
        "1. Simple format (for short PPTs without major sections):\n{}\n\n2. Part-based format (for longer PPTs with major sections):\n{}{}",
        SIMPLE_FORMAT_EXAMPLE, PART_FORMAT_EXAMPLE_BODY, part_tail
    )
}
