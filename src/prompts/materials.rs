//! Reference-material embedding.
//!
//! Uploaded reference files are surfaced to the model as a tagged block
//! prepended to the rest of the prompt. Content is embedded raw: nothing is
//! escaped, truncated or reordered, so the model sees exactly what the user
//! uploaded.

use crate::context::ReferenceFile;

/// Render uploaded reference files as an `<uploaded_files>` block.
///
/// Returns the empty string when there are no files; otherwise one `<file>`
/// element per file in upload order, with the filename as an attribute and
/// the raw content as a nested text node, followed by a single trailing
/// newline so the block separates cleanly from the instruction body.
///
/// # Examples
///
/// ```
/// use deckforge::context::ReferenceFile;
/// use deckforge::prompts::format_reference_files_block;
///
/// let files = vec![ReferenceFile::new("notes.md", "# Bees\nPollinators.")];
/// let block = format_reference_files_block(&files);
/// assert!(block.starts_with("<uploaded_files>"));
/// assert!(block.contains("<file name=\"notes.md\">"));
/// assert!(format_reference_files_block(&[]).is_empty());
/// ```
pub fn format_reference_files_block(files: &[ReferenceFile]) -> String {
    if files.is_empty() {
        return String::new();
    }

    let mut parts: Vec<String> = vec!["<uploaded_files>".to_string()];
    for file in files {
        parts.push(format!("  <file name=\"{}\">", file.filename));
        parts.push("    <content>".to_string());
        parts.push(file.content.clone());
        parts.push("    </content>".to_string());
        parts.push("  </file>".to_string());
    }
    parts.push("</uploaded_files>".to_string());
    parts.push(String::new());

    parts.join("\n")
}
