//! Prompt builders for the per-page description stages: generation for a
//! single page, splitting a full description text across outline pages, and
//! refining all page descriptions under user feedback.
//!
//! The "Page Title:" / "Page Content:" text shape and the `/files/`
//! image-surfacing rule embedded here are load-bearing: the downstream parser
//! and renderer match on them.

use tracing::debug;

use crate::context::{PageDescriptor, ProjectContext};
use crate::outline::{outline_to_json, page_to_json, OutlineEntry, OutlinePage};
use crate::prompts::language::{LanguageCode, LanguagePolicy};
use crate::prompts::materials::format_reference_files_block;
use crate::prompts::{previous_requirements_block, NO_CONTENT_MARKER};

/// Template for generating a single page's content description.
const PAGE_DESCRIPTION_PROMPT: &str = r#"We are generating content descriptions for each page of a PPT.
The user's original request is:
{original_request}

We already have the complete outline:
{outline}
{part_info}
Now please generate the description for page {page_index}:
{page_outline}

[Important] The generated "Page Content" will be directly rendered onto the PPT page, so please ensure:
1. The content is concise, with each point controlled within 15-30 words.
2. Clear organization, using list format.
3. Avoid long sentences and complex expressions.
4. Ensure strong readability, suitable for presentation.
5. Do not include any extra explanatory text or comments.

Output format example:
Page Title: Primitive Society: Symbiosis with Nature

Page Content:
- Hunter-gatherer civilization: Small scale human activity, limited impact on environment
- Strong dependence: Life completely depended on direct supply of natural resources
- Adaptation not modification: Learned from nature, developed survival skills
- Impact characteristics: Local, short-term, low intensity, self-recovering ecology

Other page materials (add if available, including markdown image links, formulas, tables, etc.)

[About Images] If the reference files contain local file URL images starting with /files/ (e.g., /files/mineru/xxx/image.png), please output these images in markdown format, e.g., ![Image Description](/files/mineru/xxx/image.png). These images will be included in the PPT page.

{language_instruction}
"#;

/// Template for splitting one description text into per-page descriptions.
const DESCRIPTION_SPLIT_PROMPT: &str = r#"You are a helpful assistant that splits a complete PPT description text into individual page descriptions.

The user has provided a complete description text:

{description_text}

We have already extracted the outline structure:

{outline_json}

Your task is to split the description text into individual page descriptions based on the outline structure.
For each page in the outline, extract the corresponding description from the original text.

Return a JSON array where each element corresponds to a page in the outline (in the same order).
Each element should be a string containing the page description in the following format:

Page Title: [Page Title]

Page Content:
- [Point 1]
- [Point 2]
...

Example output format:
[
    "Page Title: The Birth of AI\nPage Content:\n- In 1950, Turing proposed the 'Turing Test'...",
    "Page Title: History of AI\nPage Content:\n- 1950s: Symbolism...",
    ...
]

Important rules:
- Split the description text according to the outline structure
- DO NOT modify, rewrite, or change any text from the original description
- DO NOT add new content that wasn't in the original text
- DO NOT remove any important content from the original text
- Each page description should match the corresponding page in the outline
- Keep the format consistent with the example above
- If a page in the outline doesn't have a clear description in the text, create a reasonable description based on the outline

Now split the description text into individual page descriptions. Return only the JSON array, don't include any other text.
{language_instruction}
"#;

/// Template for revising every page description under a new requirement.
const DESCRIPTIONS_REFINEMENT_PROMPT: &str = r#"You are a helpful assistant that modifies PPT page descriptions based on user requirements.
{original_input_info}{outline_block}
{descriptions_summary}
{previous_requirements}
**User's new requirement: {user_requirement}**

Please modify and adjust all page descriptions based on the user's requirement. You can:
- Modify page titles and content
- Adjust the detail level of page text
- Add or delete points
- Adjust structure and expression of descriptions
- Ensure all page descriptions meet user requirements
- If there is currently no content, create new descriptions based on the outline and user requirements

Please generate modified descriptions for each page in the following format:

Page Title: [Page Title]

Page Content:
- [Point 1]
- [Point 2]
...
Other page materials (add if available, including markdown image links etc.)

Hint: If the reference files contain local file URL images starting with /files/ (e.g., /files/mineru/xxx/image.png), please output these images in markdown format, e.g., ![Image Description](/files/mineru/xxx/image.png), instead of plain text.

Please return a JSON array, where each element is a string corresponding to the modified description of each page (in page order).

Example output format:
[
    "Page Title: The Birth of AI\nPage Content:\n- In 1950, Turing proposed the 'Turing Test'...",
    "Page Title: History of AI\nPage Content:\n- 1950s: Symbolism...",
    ...
]

Now please modify all page descriptions based on user requirements. Return only the JSON array, no other text.
{language_instruction}
"#;

/// Builds the page-description prompt for one target page.
///
/// # Arguments
///
/// * `ctx` - Project context supplying reference files and the original
///   request recap
/// * `outline` - The complete outline, embedded as pretty JSON
/// * `page_outline` - The target page's sub-outline
/// * `page_index` - 1-based page number
/// * `part_info` - Optional section-context text for sectioned outlines
/// * `policy` / `language` - Output-language resolution
pub fn build_page_description_prompt(
    ctx: &ProjectContext,
    outline: &[OutlineEntry],
    page_outline: &OutlinePage,
    page_index: usize,
    part_info: Option<&str>,
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let files_block = format_reference_files_block(&ctx.reference_files_content);
    let body = PAGE_DESCRIPTION_PROMPT
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace("{original_request}", &ctx.original_request_text())
        .replace("{outline}", &outline_to_json(outline))
        .replace("{part_info}", part_info.unwrap_or_default())
        .replace("{page_index}", &page_index.to_string())
        .replace("{page_outline}", &page_to_json(page_outline));

    let prompt = format!("{}{}", files_block, body);
    debug!(stage = "page_description", page_index, "composed prompt:\n{}", prompt);
    prompt
}

/// Builds the description-split prompt.
///
/// The outline is embedded as pretty JSON so the model can align each page
/// with its span of the source text; pages without a clear span are
/// synthesized from their outline entry rather than dropped.
pub fn build_description_split_prompt(
    ctx: &ProjectContext,
    outline: &[OutlineEntry],
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let prompt = DESCRIPTION_SPLIT_PROMPT
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace(
            "{description_text}",
            ctx.description_text.as_deref().unwrap_or_default(),
        )
        .replace("{outline_json}", &outline_to_json(outline));

    debug!(stage = "description_split", "composed prompt:\n{}", prompt);
    prompt
}

/// Builds the descriptions-refinement prompt.
///
/// Every page's current content is listed in the summary block; a page
/// without content renders its own sentinel line, and when no page has any
/// content the whole summary collapses to a single sentinel inviting fresh
/// generation from the outline.
pub fn build_descriptions_refinement_prompt(
    current_descriptions: &[PageDescriptor],
    user_requirement: &str,
    ctx: &ProjectContext,
    outline: Option<&[OutlineEntry]>,
    previous_requirements: &[String],
    policy: &LanguagePolicy,
    language: Option<LanguageCode>,
) -> String {
    let files_block = format_reference_files_block(&ctx.reference_files_content);

    let outline_block = outline
        .filter(|entries| !entries.is_empty())
        .map(|entries| format!("\n\nComplete PPT Outline:\n{}\n", outline_to_json(entries)))
        .unwrap_or_default();

    let body = DESCRIPTIONS_REFINEMENT_PROMPT
        .replace("{language_instruction}", policy.prose_instruction(language))
        .replace("{original_input_info}", &ctx.original_input_info())
        .replace("{outline_block}", &outline_block)
        .replace(
            "{descriptions_summary}",
            &descriptions_summary(current_descriptions),
        )
        .replace(
            "{previous_requirements}",
            &previous_requirements_block(previous_requirements),
        )
        .replace("{user_requirement}", user_requirement);

    let prompt = format!("{}{}", files_block, body);
    debug!(stage = "descriptions_refinement", "composed prompt:\n{}", prompt);
    prompt
}

/// Render the per-page summary block for the refinement stage.
fn descriptions_summary(descriptors: &[PageDescriptor]) -> String {
    let mut summary = String::from("Current descriptions of all pages:\n\n");
    let mut has_any_description = false;

    for descriptor in descriptors {
        let page_num = descriptor.index + 1;
        let content = descriptor.content_text();
        if content.is_empty() {
            summary.push_str(&format!(
                "--- Page {}: {} ---\n{}\n\n",
                page_num, descriptor.title, NO_CONTENT_MARKER
            ));
        } else {
            has_any_description = true;
            summary.push_str(&format!(
                "--- Page {}: {} ---\n{}\n\n",
                page_num, descriptor.title, content
            ));
        }
    }

    if !has_any_description {
        return "Current descriptions of all pages:\n\n(No content currently, need to generate new descriptions based on outline)\n\n"
            .to_string();
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CreationType, DescriptionContent, ReferenceFile};

    fn idea_context(idea: &str) -> ProjectContext {
        let mut ctx = ProjectContext::new(CreationType::Idea);
        ctx.idea_prompt = Some(idea.to_string());
        ctx
    }

    fn policy() -> LanguagePolicy {
        LanguagePolicy::fixed(LanguageCode::En)
    }

    fn sample_outline() -> Vec<OutlineEntry> {
        vec![
            OutlineEntry::Page(OutlinePage::new("Welcome", vec!["point1".to_string()])),
            OutlineEntry::Page(OutlinePage::new("Hives", vec!["point2".to_string()])),
        ]
    }

    fn descriptor(index: usize, title: &str, content: Option<&str>) -> PageDescriptor {
        PageDescriptor {
            index,
            title: title.to_string(),
            description_content: content.map(|text| DescriptionContent::Text(text.to_string())),
        }
    }

    #[test]
    fn test_page_description_prompt_structure() {
        let ctx = idea_context("intro to bees");
        let page = OutlinePage::new("Hives", vec!["point2".to_string()]);
        let prompt = build_page_description_prompt(
            &ctx,
            &sample_outline(),
            &page,
            2,
            Some("Current part: Biology"),
            &policy(),
            None,
        );

        assert!(prompt.contains("The user's original request is:\nintro to bees"));
        assert!(prompt.contains("Now please generate the description for page 2:"));
        assert!(prompt.contains("Current part: Biology"));
        assert!(prompt.contains("each point controlled within 15-30 words"));
        assert!(prompt.contains("Page Title: Primitive Society: Symbiosis with Nature"));
        assert!(prompt.contains("Other page materials"));
    }

    #[test]
    fn test_page_description_prompt_always_carries_files_rule() {
        let ctx = idea_context("bees");
        let page = OutlinePage::new("Welcome", vec![]);
        let prompt =
            build_page_description_prompt(&ctx, &sample_outline(), &page, 1, None, &policy(), None);

        assert!(prompt.contains(
            "local file URL images starting with /files/ (e.g., /files/mineru/xxx/image.png)"
        ));
        assert!(prompt.contains("![Image Description](/files/mineru/xxx/image.png)"));
    }

    #[test]
    fn test_split_prompt_constraints_and_shape() {
        let mut ctx = ProjectContext::new(CreationType::Descriptions);
        ctx.description_text = Some("First we cover hives, then honey.".to_string());
        let prompt = build_description_split_prompt(&ctx, &sample_outline(), &policy(), None);

        assert!(prompt.contains("First we cover hives, then honey."));
        assert!(prompt.contains("\"title\": \"Welcome\""));
        assert!(prompt.contains("DO NOT modify"));
        assert!(prompt.contains("DO NOT add"));
        assert!(prompt.contains("DO NOT remove"));
        assert!(prompt.contains(r#""Page Title: The Birth of AI\nPage Content:\n"#));
        assert!(prompt.contains("create a reasonable description based on the outline"));
    }

    #[test]
    fn test_split_prompt_has_no_reference_block() {
        let mut ctx = ProjectContext::new(CreationType::Descriptions);
        ctx.description_text = Some("text".to_string());
        ctx.reference_files_content = vec![ReferenceFile::new("x.md", "material")];
        let prompt = build_description_split_prompt(&ctx, &sample_outline(), &policy(), None);

        assert!(!prompt.contains("<uploaded_files>"));
        assert!(prompt.starts_with("You are a helpful assistant that splits"));
    }

    #[test]
    fn test_refinement_prompt_mixed_content() {
        let descriptors = vec![
            descriptor(0, "Welcome", Some("Page Title: Welcome\n\nPage Content:\n- hi")),
            descriptor(1, "Hives", None),
        ];
        let ctx = idea_context("bees");
        let prompt = build_descriptions_refinement_prompt(
            &descriptors,
            "more detail",
            &ctx,
            Some(&sample_outline()),
            &[],
            &policy(),
            None,
        );

        assert!(prompt.contains("--- Page 1: Welcome ---\nPage Title: Welcome"));
        assert!(prompt.contains("--- Page 2: Hives ---\n(No content currently)"));
        assert!(prompt.contains("Complete PPT Outline:"));
        assert!(prompt.contains("**User's new requirement: more detail**"));
        assert!(prompt.contains("instead of plain text"));
    }

    #[test]
    fn test_refinement_prompt_all_empty_collapses_to_single_sentinel() {
        let descriptors = vec![
            descriptor(0, "Welcome", None),
            descriptor(1, "Hives", Some("")),
        ];
        let ctx = idea_context("bees");
        let prompt = build_descriptions_refinement_prompt(
            &descriptors,
            "fill in",
            &ctx,
            None,
            &[],
            &policy(),
            None,
        );

        assert!(prompt
            .contains("(No content currently, need to generate new descriptions based on outline)"));
        assert_eq!(prompt.matches("No content currently").count(), 1);
        assert!(!prompt.contains("--- Page 1"));
    }

    #[test]
    fn test_refinement_prompt_history_block() {
        let descriptors = vec![descriptor(0, "Welcome", Some("content"))];
        let ctx = idea_context("bees");
        let history = vec!["shorter".to_string()];
        let prompt = build_descriptions_refinement_prompt(
            &descriptors,
            "longer",
            &ctx,
            None,
            &history,
            &policy(),
            None,
        );

        assert!(prompt.contains("Previous user modification requests:\n- shorter"));
    }
}
