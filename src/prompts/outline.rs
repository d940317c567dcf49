//! Prompt builders for the outline stages: generation from an idea, parsing
//! of user-provided outline text, extraction from description text, and
//! refinement under user feedback.
//!
//! All four stages share the dual-format output contract from
//! [`crate::outline::format_options`] and accept uploaded reference files,
//! which are prepended as an `<uploaded_files>` block.

use tracing::debug;

use crate::context::ProjectContext;
use crate::outline::{format_options, outline_to_json, OutlineEntry};
use crate::prompts::language::{LanguageCode, LanguagePolicy};
use crate::prompts::materials::format_reference_files_block;
use crate::prompts::{previous_requirements_block, NO_CONTENT_MARKER};

/// Template for generating an outline from the user's idea text.
const OUTLINE_GENERATION_PROMPT: &str = r#"You are a helpful assistant that generates an outline for a ppt.

You can organize the content in two ways:

{format_options}

Choose the format that best fits the content. Use parts when the PPT has clear major sections.
Unless otherwise specified, the first page should be kept simplest, containing only the title, subtitle, and presenter information.

The user's request: {idea_prompt}. Now generate the outline, don't include any other text.
{language_instruction}
"#;

/// Template for restructuring user-provided outline text without rewriting it.
const OUTLINE_PARSING_PROMPT: &str = r#"You are a helpful assistant that parses a user-provided PPT outline text into a structured format.

The user has provided the following outline text:

{outline_text}

Your task is to analyze this text and convert it into a structured JSON format WITHOUT modifying any of the original text content.
You should only reorganize and structure the existing content, preserving all titles, points, and text exactly as provided.

You can organize the content in two ways:

{format_options}

Important rules:
- DO NOT modify, rewrite, or change any text from the original outline
- DO NOT add new content that wasn't in the original text
- DO NOT remove any content from the original text
- Only reorganize the existing content into the structured format
- Preserve all titles, bullet points, and text exactly as they appear
- If the text has clear sections/parts, use the part-based format
- Extract titles and points from the original text, keeping them exactly as written

Now parse the outline text above into the structured format. Return only the JSON, don't include any other text.
{language_instruction}
"#;

/// Template for inferring an outline from free-form description text.
const DESCRIPTION_TO_OUTLINE_PROMPT: &str = r#"You are a helpful assistant that analyzes a user-provided PPT description text and extracts the outline structure from it.

The user has provided the following description text:

{description_text}

Your task is to analyze this text and extract the outline structure (titles and key points) for each page.
You should identify:
1. How many pages are described
2. The title for each page
3. The key points or content structure for each page

You can organize the content in two ways:

{format_options}

Important rules:
- Extract the outline structure from the description text
- Identify page titles and key points
- If the text has clear sections/parts, use the part-based format
- Preserve the logical structure and organization from the original text
- The points should be concise summaries of the main content for each page

Now extract the outline structure from the description text above. Return only the JSON, don't include any other text.
{language_instruction}
"#;

/// Template for revising an existing outline under a new user requirement.
const OUTLINE_REFINEMENT_PROMPT: &str = r#"You are a helpful assistant that modifies PPT outlines based on user requirements.
{original_input_info}
The current PPT outline structure is as follows:

{current_outline}
{previous_requirements}
**User's new requirement: {user_requirement}**

Please modify and adjust the outline based on the user's requirement. You can:
- Add, delete, or rearrange pages
- Modify page titles and points
- Adjust page organization structure
- Add or delete sections (parts)
- Merge or split pages
- Make any reasonable adjustments based on user requirements
- If there is currently no content, create a new outline based on the user requirement and original input

Output format options:

{format_options}

Choose the format that best fits the content. Use parts when the PPT has clear major sections.

Now please modify the outline based on user requirements. Return only the JSON outline, no other text.
{language_instruction}
"#;

/// Builds the outline-generation prompt from the project's idea text.
///
/// Reference files, when present, are prepended as an `<uploaded_files>`
/// block. An absent idea degrades to an empty substitution.
///
/// # Examples
///
/// ```
/// use deckforge::context::{CreationType, ProjectContext};
/// use deckforge::prompts::language::{LanguageCode, LanguagePolicy};
/// use deckforge::prompts::build_outline_generation_prompt;
///
/// let mut ctx = ProjectContext::new(CreationType::Idea);
/// ctx.idea_prompt = Some("A 5-slide intro to bees".to_string());
/// let policy = LanguagePolicy::fixed(LanguageCode::En);
///
/// let prompt = build_outline_generation_prompt(&ctx, &policy, None);
/// assert!(prompt.contains("The user's request: A 5-slide intro to bees."));
/// ```
pub fn build_outline_generation_prompt(
    ctx: &ProjectContext,
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let files_block = format_reference_files_block(&ctx.reference_files_content);
    let body = OUTLINE_GENERATION_PROMPT
        .replace("{format_options}", &format_options(true))
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace("{idea_prompt}", ctx.idea_prompt.as_deref().unwrap_or_default());

    let prompt = format!("{}{}", files_block, body);
    debug!(stage = "outline_generation", "composed prompt:\n{}", prompt);
    prompt
}

/// Builds the outline-parsing prompt for user-provided outline text.
///
/// The instruction forbids the model from modifying, adding or removing any
/// token of the source text; it may only reorganize it into the structured
/// dual-format JSON.
pub fn build_outline_parsing_prompt(
    ctx: &ProjectContext,
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let files_block = format_reference_files_block(&ctx.reference_files_content);
    let body = OUTLINE_PARSING_PROMPT
        .replace("{format_options}", &format_options(false))
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace("{outline_text}", ctx.outline_text.as_deref().unwrap_or_default());

    let prompt = format!("{}{}", files_block, body);
    debug!(stage = "outline_parsing", "composed prompt:\n{}", prompt);
    prompt
}

/// Builds the prompt that extracts an outline from full description text.
pub fn build_description_to_outline_prompt(
    ctx: &ProjectContext,
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let files_block = format_reference_files_block(&ctx.reference_files_content);
    let body = DESCRIPTION_TO_OUTLINE_PROMPT
        .replace("{format_options}", &format_options(true))
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace(
            "{description_text}",
            ctx.description_text.as_deref().unwrap_or_default(),
        );

    let prompt = format!("{}{}", files_block, body);
    debug!(stage = "description_to_outline", "composed prompt:\n{}", prompt);
    prompt
}

/// Builds the outline-refinement prompt.
///
/// # Arguments
///
/// * `current_outline` - The outline being revised; empty renders the
///   no-content sentinel and invites the model to create a fresh outline
/// * `user_requirement` - The new free-text requirement to apply
/// * `ctx` - Project context supplying reference files and the
///   creation-type-driven original-input recap
/// * `previous_requirements` - Earlier requirements, rendered as a bulleted
///   history block when non-empty
/// * `policy` / `language` - Output-language resolution
pub fn build_outline_refinement_prompt(
    current_outline: &[OutlineEntry],
    user_requirement: &str,
    ctx: &ProjectContext,
    previous_requirements: &[String],
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let files_block = format_reference_files_block(&ctx.reference_files_content);

    let outline_text = if current_outline.is_empty() {
        NO_CONTENT_MARKER.to_string()
    } else {
        outline_to_json(current_outline)
    };

    let body = OUTLINE_REFINEMENT_PROMPT
        .replace("{format_options}", &format_options(false))
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace("{original_input_info}", &ctx.original_input_info())
        .replace("{current_outline}", &outline_text)
        .replace(
            "{previous_requirements}",
            &previous_requirements_block(previous_requirements),
        )
        .replace("{user_requirement}", user_requirement);

    let prompt = format!("{}{}", files_block, body);
    debug!(stage = "outline_refinement", "composed prompt:\n{}", prompt);
    prompt
}
