//! Caller-owned project context and per-page description types.
//!
//! A [`ProjectContext`] bundles the original user inputs for one
//! deck-generation project. Exactly one of the three text fields is
//! authoritative, selected by [`CreationType`]; the others may be stale or
//! absent and are only consulted as fallbacks. The context is read-only to
//! the prompt builders and never retained between calls.

use serde::{Deserialize, Serialize};

/// Which original input the user supplied for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationType {
    /// A free-text idea the deck should be generated from.
    Idea,
    /// A user-written outline to be parsed into the structured form.
    Outline,
    /// Full per-page description text to split and structure.
    Descriptions,
}

/// One uploaded reference file made available to the model for grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFile {
    /// Name the file was uploaded under.
    pub filename: String,
    /// Raw extracted text content.
    pub content: String,
}

impl ReferenceFile {
    /// Create a reference file from a name and its extracted content.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// The caller-owned bundle of original user inputs for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Which original input is authoritative.
    pub creation_type: CreationType,
    /// Free-text idea, present when the project was created from an idea.
    #[serde(default)]
    pub idea_prompt: Option<String>,
    /// Raw outline text, present when created from an outline.
    #[serde(default)]
    pub outline_text: Option<String>,
    /// Full description text, present when created from descriptions.
    #[serde(default)]
    pub description_text: Option<String>,
    /// Uploaded reference files, in upload order. Empty when none exist.
    #[serde(default)]
    pub reference_files_content: Vec<ReferenceFile>,
}

impl ProjectContext {
    /// Create a context with the given creation type and no inputs.
    pub fn new(creation_type: CreationType) -> Self {
        Self {
            creation_type,
            idea_prompt: None,
            outline_text: None,
            description_text: None,
            reference_files_content: Vec::new(),
        }
    }

    /// The authoritative original input rendered as a prose recap, used by
    /// the page-description stage. Falls back to the idea text, then to the
    /// empty string, when the active type's field is absent or empty.
    pub fn original_request_text(&self) -> String {
        match self.creation_type {
            CreationType::Idea if non_empty(&self.idea_prompt).is_some() => {
                self.idea_prompt.clone().unwrap_or_default()
            }
            CreationType::Outline if non_empty(&self.outline_text).is_some() => {
                format!(
                    "User provided outline:\n{}",
                    self.outline_text.as_deref().unwrap_or_default()
                )
            }
            CreationType::Descriptions if non_empty(&self.description_text).is_some() => {
                format!(
                    "User provided descriptions:\n{}",
                    self.description_text.as_deref().unwrap_or_default()
                )
            }
            _ => self.idea_prompt.clone().unwrap_or_default(),
        }
    }

    /// The "Original Input Info" recap block used by the refinement stages.
    ///
    /// Always opens with the block header; the detail line is chosen by the
    /// creation type, falling back to a generic user-input line when only the
    /// idea text is available, and to the bare header when nothing is.
    pub fn original_input_info(&self) -> String {
        let mut block = String::from("\nOriginal Input Info:\n");
        match self.creation_type {
            CreationType::Idea if non_empty(&self.idea_prompt).is_some() => {
                block.push_str(&format!(
                    "- PPT Idea: {}\n",
                    self.idea_prompt.as_deref().unwrap_or_default()
                ));
            }
            CreationType::Outline if non_empty(&self.outline_text).is_some() => {
                block.push_str(&format!(
                    "- User provided outline text:\n{}\n",
                    self.outline_text.as_deref().unwrap_or_default()
                ));
            }
            CreationType::Descriptions if non_empty(&self.description_text).is_some() => {
                block.push_str(&format!(
                    "- User provided page description text:\n{}\n",
                    self.description_text.as_deref().unwrap_or_default()
                ));
            }
            _ => {
                if let Some(idea) = non_empty(&self.idea_prompt) {
                    block.push_str(&format!("- User Input: {}\n", idea));
                }
            }
        }
        block
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Page description content as stored by the context store: either a bare
/// string or an object wrapping the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionContent {
    /// Plain description text.
    Text(String),
    /// Text wrapped in an object, as some stores persist it.
    Wrapped {
        /// The description text.
        text: String,
    },
}

impl DescriptionContent {
    /// Extract the plain text regardless of representation.
    pub fn as_text(&self) -> &str {
        match self {
            DescriptionContent::Text(text) => text,
            DescriptionContent::Wrapped { text } => text,
        }
    }
}

/// One page's current state as input to the per-page stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Zero-based page index.
    pub index: usize,
    /// Page title.
    pub title: String,
    /// Current description content, if any has been generated.
    #[serde(default)]
    pub description_content: Option<DescriptionContent>,
}

impl PageDescriptor {
    /// The page's description text; empty when no content exists yet.
    pub fn content_text(&self) -> &str {
        self.description_content
            .as_ref()
            .map(DescriptionContent::as_text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(
        creation_type: CreationType,
        idea: Option<&str>,
        outline: Option<&str>,
        descriptions: Option<&str>,
    ) -> ProjectContext {
        ProjectContext {
            creation_type,
            idea_prompt: idea.map(String::from),
            outline_text: outline.map(String::from),
            description_text: descriptions.map(String::from),
            reference_files_content: Vec::new(),
        }
    }

    #[test]
    fn test_original_request_prefers_active_field() {
        let ctx = context_with(
            CreationType::Outline,
            Some("stale idea"),
            Some("1. Intro\n2. Body"),
            None,
        );
        let recap = ctx.original_request_text();
        assert_eq!(recap, "User provided outline:\n1. Intro\n2. Body");
    }

    #[test]
    fn test_original_request_falls_back_to_idea() {
        let ctx = context_with(CreationType::Descriptions, Some("the idea"), None, None);
        assert_eq!(ctx.original_request_text(), "the idea");
    }

    #[test]
    fn test_original_request_empty_active_field_falls_back() {
        let ctx = context_with(CreationType::Idea, Some(""), None, Some("descriptions"));
        assert_eq!(ctx.original_request_text(), "");
    }

    #[test]
    fn test_original_input_info_idea() {
        let ctx = context_with(CreationType::Idea, Some("intro to bees"), None, None);
        let block = ctx.original_input_info();
        assert!(block.starts_with("\nOriginal Input Info:\n"));
        assert!(block.contains("- PPT Idea: intro to bees\n"));
    }

    #[test]
    fn test_original_input_info_descriptions() {
        let ctx = context_with(CreationType::Descriptions, None, None, Some("page one..."));
        let block = ctx.original_input_info();
        assert!(block.contains("- User provided page description text:\npage one...\n"));
    }

    #[test]
    fn test_original_input_info_generic_fallback() {
        let ctx = context_with(CreationType::Outline, Some("fallback idea"), None, None);
        let block = ctx.original_input_info();
        assert!(block.contains("- User Input: fallback idea\n"));
    }

    #[test]
    fn test_original_input_info_bare_header_when_empty() {
        let ctx = context_with(CreationType::Outline, None, None, None);
        assert_eq!(ctx.original_input_info(), "\nOriginal Input Info:\n");
    }

    #[test]
    fn test_description_content_both_shapes() {
        let plain: DescriptionContent = serde_json::from_str("\"some text\"").expect("plain");
        assert_eq!(plain.as_text(), "some text");

        let wrapped: DescriptionContent =
            serde_json::from_str(r#"{"text": "wrapped text"}"#).expect("wrapped");
        assert_eq!(wrapped.as_text(), "wrapped text");
    }

    #[test]
    fn test_page_descriptor_content_text() {
        let descriptor = PageDescriptor {
            index: 0,
            title: "Welcome".to_string(),
            description_content: None,
        };
        assert_eq!(descriptor.content_text(), "");

        let descriptor = PageDescriptor {
            index: 1,
            title: "Overview".to_string(),
            description_content: Some(DescriptionContent::Text("body".to_string())),
        };
        assert_eq!(descriptor.content_text(), "body");
    }

    #[test]
    fn test_creation_type_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&CreationType::Descriptions).expect("serialize"),
            "\"descriptions\""
        );
        let parsed: CreationType = serde_json::from_str("\"idea\"").expect("parse");
        assert_eq!(parsed, CreationType::Idea);
    }
}
