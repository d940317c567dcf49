//! Prompt builders for the image stages: page-image generation, page-image
//! editing, and background extraction.
//!
//! These are the two stages that also carry non-text payloads (template and
//! material images) at the model-client boundary; the text composed here only
//! references those payloads. The cover-page aside and the background
//! extraction instruction are intentionally in Chinese; the image model was
//! tuned with them in that form.

use tracing::debug;

use crate::prompts::language::{LanguageCode, LanguagePolicy};

/// Marker separating a page description from trailing generated-image
/// references; everything from here onward is stripped before an edit.
pub const PAGE_MATERIALS_MARKER: &str = "Other page materials";

/// Marker used by older stored descriptions.
const LEGACY_PAGE_MATERIALS_MARKER: &str = "其他页面素材";

/// Template for generating a page image from its description.
const IMAGE_GENERATION_PROMPT: &str = r#"You are an expert UI/UX presentation designer, focused on generating well-designed PPT pages.
The current PPT page description is as follows:
<page_description>
{page_description}
</page_description>

<reference_information>
The entire PPT outline is:
{outline_text}

Current section: {current_section}
</reference_information>


<design_guidelines>
- Require clear and sharp text, 4K resolution, 16:9 aspect ratio.
- Color scheme and design language must be strictly similar to the template image.
- Automatically design the most perfect composition based on content, rendering the text in "page description" without omission or duplication.
- Do not use markdown symbols (like # and *) unless necessary.
- Only reference the style design, do not use the text from the template.
- Use appropriately sized decorative graphics or illustrations to fill empty spaces.
</design_guidelines>
{deck_text_instruction}
{material_images_note}{extra_requirements}

{cover_note}
"#;

/// Hint appended when selectable material images accompany the request.
const MATERIAL_IMAGES_NOTE: &str = "\n\nHint: In addition to the template reference image (for style reference), extra material images are provided. These material images are elements available for selection. You can choose suitable images, icons, charts, or other visual elements from them and directly integrate them into the generated PPT page. Please intelligently select and combine elements from these material images based on the page content needs.";

/// Cover-page emphasis aside, appended only for the first page.
const COVER_PAGE_NOTE: &str = "**注意：当前页面为ppt的封面页，请你采用专业的封面设计美学技巧，务必凸显出页面标题，分清主次，确保一下就能抓住观众的注意力。**";

/// Template for editing an existing page image, with its original description
/// as context.
const IMAGE_EDIT_PROMPT: &str = r#"The original description of this PPT page is:
{original_description}

Now, please modify this PPT page according to the following instruction: {edit_instruction}

Requirement: Maintain the original text content and design style, only modify according to the instruction. The provided reference image contains both new materials and user-selected regions. Please intelligently judge the user's intent based on the relationship between the original image and the reference image.
"#;

/// Fixed instruction for extracting a clean background from a page image.
const CLEAN_BACKGROUND_PROMPT: &str = r#"你是一位专业的图片前景擦除专家。你的任务是从原始图片中移除文字和配图，输出一张无任何文字内容、干净纯净的背景模板图。
<requirements>
- 彻底移除页面中的所有文字、插画、图表。必须确保所有文字都被完全去除。
- 保持原背景设计的完整性（包括渐变、纹理、图案、线条、色块等）。保留原图的文本框色块。
- 对于被前景元素遮挡的背景区域，要智能填补，使背景保持无缝和完整。
- 输出图片的尺寸、风格、配色必须和原图完全一致。
- 请勿新增任何元素。
</requirements>

注意，**所有**文字和图表都应该被彻底移除，**不能遗留任何一个。**
"#;

/// Inputs to the image-generation stage.
///
/// Built with the `with_*` methods; only the page description, outline text
/// and section label are always required.
#[derive(Debug, Clone)]
pub struct ImageGenerationParams<'a> {
    /// Description text of the page being rendered.
    pub page_description: &'a str,
    /// The full outline, already rendered to text.
    pub outline_text: &'a str,
    /// Label of the section the page belongs to.
    pub current_section: &'a str,
    /// Whether selectable material images accompany the request.
    pub has_material_images: bool,
    /// Free-text extra requirements (e.g. a style description).
    pub extra_requirements: Option<&'a str>,
    /// Explicit output language for presentation text.
    pub language: Option<LanguageCode>,
    /// Whether a style-template image accompanies the request.
    pub has_template: bool,
    /// 1-based page number; page 1 receives the cover-page aside.
    pub page_index: usize,
}

impl<'a> ImageGenerationParams<'a> {
    /// Create params for a page with default flags: no materials, no extra
    /// requirements, template image present, page 1.
    pub fn new(page_description: &'a str, outline_text: &'a str, current_section: &'a str) -> Self {
        Self {
            page_description,
            outline_text,
            current_section,
            has_material_images: false,
            extra_requirements: None,
            language: None,
            has_template: true,
            page_index: 1,
        }
    }

    /// Set whether selectable material images accompany the request.
    pub fn with_material_images(mut self, has_material_images: bool) -> Self {
        self.has_material_images = has_material_images;
        self
    }

    /// Set free-text extra requirements.
    pub fn with_extra_requirements(mut self, extra_requirements: &'a str) -> Self {
        self.extra_requirements = Some(extra_requirements);
        self
    }

    /// Set the output language for presentation text.
    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = Some(language);
        self
    }

    /// Set whether a style-template image accompanies the request.
    pub fn with_template(mut self, has_template: bool) -> Self {
        self.has_template = has_template;
        self
    }

    /// Set the 1-based page number.
    pub fn with_page_index(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }
}

/// Builds the image-generation prompt for one page.
///
/// The composed text carries the design-guideline block and, in order: the
/// presentation-text language instruction, the material-selection hint (when
/// material images are available), the extra-requirements block (when
/// provided), and the cover-page aside (page 1 only).
///
/// # Examples
///
/// ```
/// use deckforge::prompts::language::{LanguageCode, LanguagePolicy};
/// use deckforge::prompts::{build_image_generation_prompt, ImageGenerationParams};
///
/// let params = ImageGenerationParams::new("Page Title: Welcome", "the outline", "Introduction")
///     .with_page_index(2);
/// let policy = LanguagePolicy::fixed(LanguageCode::En);
///
/// let prompt = build_image_generation_prompt(&params, &policy);
/// assert!(prompt.contains("<design_guidelines>"));
/// assert!(!prompt.contains("封面页"));
/// ```
pub fn build_image_generation_prompt(
    params: &ImageGenerationParams<'_>,
    policy: &LanguagePolicy,
) -> String {
    let material_images_note = if params.has_material_images {
        MATERIAL_IMAGES_NOTE
    } else {
        ""
    };

    let extra_requirements = params
        .extra_requirements
        .filter(|text| !text.trim().is_empty())
        .map(|text| format!("\n\nExtra Requirements (Must Follow):\n{}\n", text))
        .unwrap_or_default();

    let cover_note = if params.page_index == 1 {
        COVER_PAGE_NOTE
    } else {
        ""
    };

    let prompt = IMAGE_GENERATION_PROMPT
        .replace(
            "{deck_text_instruction}",
            policy.deck_text_instruction(params.language),
        )
        .replace("{material_images_note}", material_images_note)
        .replace("{extra_requirements}", &extra_requirements)
        .replace("{cover_note}", cover_note)
        .replace("{page_description}", params.page_description)
        .replace("{outline_text}", params.outline_text)
        .replace("{current_section}", params.current_section);

    debug!(
        stage = "image_generation",
        page_index = params.page_index,
        has_template = params.has_template,
        "composed prompt:\n{}",
        prompt
    );
    prompt
}

/// Builds the image-edit prompt.
///
/// When an original description is supplied, everything from the
/// [`PAGE_MATERIALS_MARKER`] (or its legacy equivalent) onward is stripped
/// before reuse, so stale generated-image references do not bias the edit.
pub fn build_image_edit_prompt(
    edit_instruction: &str,
    original_description: Option<&str>,
) -> String {
    let prompt = match original_description.filter(|text| !text.is_empty()) {
        Some(description) => {
            let trimmed = strip_page_materials(description);
            IMAGE_EDIT_PROMPT
                .replace("{original_description}", trimmed)
                .replace("{edit_instruction}", edit_instruction)
        }
        None => format!(
            "Modify this PPT page according to the following instruction: {}\nMaintain the original content structure and design style, only modify according to the instruction. The provided reference image contains both new materials and user-selected regions. Please intelligently judge the user's intent based on the relationship between the original image and the reference image.",
            edit_instruction
        ),
    };

    debug!(stage = "image_edit", "composed prompt:\n{}", prompt);
    prompt
}

/// Builds the fixed background-extraction prompt.
pub fn build_clean_background_prompt() -> String {
    let prompt = CLEAN_BACKGROUND_PROMPT.to_string();
    debug!(stage = "clean_background", "composed prompt:\n{}", prompt);
    prompt
}

/// Cut a stored description at the page-materials marker, current or legacy.
fn strip_page_materials(description: &str) -> &str {
    if let Some(position) = description.find(PAGE_MATERIALS_MARKER) {
        description[..position].trim()
    } else if let Some(position) = description.find(LEGACY_PAGE_MATERIALS_MARKER) {
        description[..position].trim()
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LanguagePolicy {
        LanguagePolicy::fixed(LanguageCode::En)
    }

    #[test]
    fn test_generation_prompt_base_structure() {
        let params = ImageGenerationParams::new(
            "Page Title: Welcome\n\nPage Content:\n- hi",
            "the outline text",
            "Introduction",
        )
        .with_page_index(3);
        let prompt = build_image_generation_prompt(&params, &policy());

        assert!(prompt.starts_with("You are an expert UI/UX presentation designer"));
        assert!(prompt.contains("<page_description>\nPage Title: Welcome"));
        assert!(prompt.contains("The entire PPT outline is:\nthe outline text"));
        assert!(prompt.contains("Current section: Introduction"));
        assert!(prompt.contains("4K resolution, 16:9 aspect ratio"));
        assert!(prompt.contains("without omission or duplication"));
        assert!(prompt.contains("Use English for PPT text."));
    }

    #[test]
    fn test_generation_prompt_cover_note_only_on_page_one() {
        let params = ImageGenerationParams::new("desc", "outline", "section");
        let cover = build_image_generation_prompt(&params.clone().with_page_index(1), &policy());
        assert!(cover.contains("封面页"));

        let inner = build_image_generation_prompt(&params.with_page_index(2), &policy());
        assert!(!inner.contains("封面页"));
    }

    #[test]
    fn test_generation_prompt_material_hint_conditional() {
        let params = ImageGenerationParams::new("desc", "outline", "section");
        let without = build_image_generation_prompt(&params.clone(), &policy());
        assert!(!without.contains("extra material images are provided"));

        let with = build_image_generation_prompt(&params.with_material_images(true), &policy());
        assert!(with.contains("extra material images are provided"));
        assert!(with.contains("intelligently select and combine elements"));
    }

    #[test]
    fn test_generation_prompt_extra_requirements_block() {
        let params = ImageGenerationParams::new("desc", "outline", "section")
            .with_extra_requirements("Use a dark palette");
        let prompt = build_image_generation_prompt(&params, &policy());
        assert!(prompt.contains("Extra Requirements (Must Follow):\nUse a dark palette"));

        let blank = ImageGenerationParams::new("desc", "outline", "section")
            .with_extra_requirements("   ");
        let prompt = build_image_generation_prompt(&blank, &policy());
        assert!(!prompt.contains("Extra Requirements"));
    }

    #[test]
    fn test_generation_prompt_text_identical_with_and_without_template() {
        let params = ImageGenerationParams::new("desc", "outline", "section");
        let with = build_image_generation_prompt(&params.clone().with_template(true), &policy());
        let without = build_image_generation_prompt(&params.with_template(false), &policy());
        assert_eq!(with, without);
    }

    #[test]
    fn test_edit_prompt_strips_page_materials() {
        let description = "Page Title: Welcome\n\nPage Content:\n- hi\n\nOther page materials: ![img](/files/a.png)";
        let prompt = build_image_edit_prompt("make the title red", Some(description));

        assert!(prompt.contains("Page Title: Welcome"));
        assert!(!prompt.contains("Other page materials"));
        assert!(!prompt.contains("/files/a.png"));
        assert!(prompt.contains("make the title red"));
        assert!(prompt.contains("Maintain the original text content and design style"));
    }

    #[test]
    fn test_edit_prompt_strips_legacy_marker() {
        let description = "Page Title: Welcome\n\n其他页面素材: old refs";
        let prompt = build_image_edit_prompt("swap the chart", Some(description));

        assert!(!prompt.contains("其他页面素材"));
        assert!(!prompt.contains("old refs"));
        assert!(prompt.contains("Page Title: Welcome"));
    }

    #[test]
    fn test_edit_prompt_without_description() {
        let prompt = build_image_edit_prompt("remove the footer", None);

        assert!(prompt.starts_with("Modify this PPT page according to the following instruction: remove the footer"));
        assert!(prompt.contains("new materials and user-selected regions"));
        assert!(!prompt.contains("The original description"));
    }

    #[test]
    fn test_clean_background_prompt_fixed_contract() {
        let prompt = build_clean_background_prompt();

        assert!(prompt.contains("<requirements>"));
        assert!(prompt.contains("彻底移除页面中的所有文字、插画、图表"));
        assert!(prompt.contains("渐变、纹理、图案、线条、色块"));
        assert!(prompt.contains("智能填补"));
        assert!(prompt.contains("请勿新增任何元素"));
    }
}
