//! Prompt builders for each stage of the deck-generation pipeline.
//!
//! Every stage has exactly one builder function that composes the final
//! instruction text from three layers, in fixed order:
//!
//! 1. The reference-material block (when the stage accepts uploaded files)
//! 2. The stage-specific instruction body, with its embedded output contract
//! 3. The language-policy instruction
//!
//! Builders are pure: the same inputs always produce the same string, no
//! builder calls another, and missing optional inputs degrade to empty
//! substitutions or the no-content sentinel rather than failing.
//!
//! # Usage
//!
//! ```
//! use deckforge::context::{CreationType, ProjectContext};
//! use deckforge::prompts::language::{LanguageCode, LanguagePolicy};
//! use deckforge::prompts::build_outline_generation_prompt;
//!
//! let mut ctx = ProjectContext::new(CreationType::Idea);
//! ctx.idea_prompt = Some("A 5-slide intro to bees".to_string());
//! let policy = LanguagePolicy::fixed(LanguageCode::En);
//!
//! let prompt = build_outline_generation_prompt(&ctx, &policy, None);
//! assert!(prompt.contains("A 5-slide intro to bees"));
//! ```

pub mod description;
pub mod image;
pub mod language;
pub mod materials;
pub mod outline;

pub use description::{
    build_description_split_prompt, build_descriptions_refinement_prompt,
    build_page_description_prompt,
};
pub use image::{
    build_clean_background_prompt, build_image_edit_prompt, build_image_generation_prompt,
    ImageGenerationParams,
};
pub use language::{LanguageCode, LanguagePolicy};
pub use materials::format_reference_files_block;
pub use outline::{
    build_description_to_outline_prompt, build_outline_generation_prompt,
    build_outline_parsing_prompt, build_outline_refinement_prompt,
};

/// Sentinel rendered in place of outline or page content that does not exist
/// yet.
pub const NO_CONTENT_MARKER: &str = "(No content currently)";

/// Render earlier user requirements as the bulleted history block shared by
/// the refinement stages. Empty input renders nothing.
pub(crate) fn previous_requirements_block(requirements: &[String]) -> String {
    if requirements.is_empty() {
        return String::new();
    }
    let list = requirements
        .iter()
        .map(|requirement| format!("- {}", requirement))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\nPrevious user modification requests:\n{}\n", list)
}
