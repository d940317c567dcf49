//! Output-language policy for composed prompts.
//!
//! Two entry points exist: one for general prose instructions (outline and
//! description stages) and one for presentation-text instructions (image
//! stages). Each resolves a language code (the explicit argument when given,
//! otherwise the injected default provider) and currently returns a fixed
//! English-only instruction regardless of the resolved code.
//!
//! The per-language instruction table the resolver was built around is kept
//! as [`LANGUAGE_TABLE`]: reinstating it means returning the resolved entry's
//! text from the two entry points, with no caller changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Supported output-language codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// Chinese.
    Zh,
    /// Japanese.
    Ja,
    /// English.
    En,
    /// No language restriction; let the model follow the input.
    Auto,
}

impl LanguageCode {
    /// Parse a configuration string into a language code.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zh" => Some(LanguageCode::Zh),
            "ja" => Some(LanguageCode::Ja),
            "en" => Some(LanguageCode::En),
            "auto" => Some(LanguageCode::Auto),
            _ => None,
        }
    }

    /// The code as its configuration string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Zh => "zh",
            LanguageCode::Ja => "ja",
            LanguageCode::En => "en",
            LanguageCode::Auto => "auto",
        }
    }

    /// Human-readable language name from the instruction table.
    pub fn name(&self) -> &'static str {
        self.table_entry().name
    }

    /// The table's prose instruction for this code.
    pub fn prose_table_instruction(&self) -> &'static str {
        self.table_entry().instruction
    }

    /// The table's presentation-text instruction for this code.
    pub fn deck_text_table_instruction(&self) -> &'static str {
        self.table_entry().ppt_text
    }

    fn table_entry(&self) -> &'static LanguageInstructions {
        LANGUAGE_TABLE
            .iter()
            .find(|entry| entry.code == *self)
            .unwrap_or(&LANGUAGE_TABLE[2])
    }
}

/// Per-language instruction texts.
#[derive(Debug, Clone)]
pub struct LanguageInstructions {
    /// The language code this entry belongs to.
    pub code: LanguageCode,
    /// Human-readable language name.
    pub name: &'static str,
    /// Instruction appended to prose prompts.
    pub instruction: &'static str,
    /// Instruction appended to presentation-text (image) prompts.
    pub ppt_text: &'static str,
}

/// The documented per-language instruction mapping.
///
/// Currently superseded by the fixed English override in [`LanguagePolicy`];
/// preserved intact so per-language output can be reinstated.
pub static LANGUAGE_TABLE: &[LanguageInstructions] = &[
    LanguageInstructions {
        code: LanguageCode::Zh,
        name: "Chinese",
        instruction: "Please output all in English。",
        ppt_text: "Use English for PPT text。",
    },
    LanguageInstructions {
        code: LanguageCode::Ja,
        name: "Japanese",
        instruction: "すべて日本語で出力してください。",
        ppt_text: "PPTのテキストは全て日本語で出力してください。",
    },
    LanguageInstructions {
        code: LanguageCode::En,
        name: "English",
        instruction: "Please output all in English.",
        ppt_text: "Use English for PPT text.",
    },
    LanguageInstructions {
        code: LanguageCode::Auto,
        name: "Auto",
        instruction: "",
        ppt_text: "",
    },
];

/// Instruction returned by the prose entry point for every code.
pub const PROSE_ENGLISH_OVERRIDE: &str = "Please answer in English.";

/// Instruction returned by the presentation-text entry point for every code.
pub const DECK_TEXT_ENGLISH_OVERRIDE: &str = "Use English for PPT text.";

/// Resolves the output language for one stage call.
///
/// The default language comes from an injected provider so the policy stays
/// unit-testable without touching process-wide configuration; the provider is
/// consulted at call time, so configuration changes take effect immediately.
pub struct LanguagePolicy {
    default_provider: Box<dyn Fn() -> LanguageCode + Send + Sync>,
}

impl LanguagePolicy {
    /// Create a policy with the given default-language provider.
    pub fn new<F>(provider: F) -> Self
    where
        F: Fn() -> LanguageCode + Send + Sync + 'static,
    {
        Self {
            default_provider: Box::new(provider),
        }
    }

    /// Create a policy with a fixed default language.
    pub fn fixed(code: LanguageCode) -> Self {
        Self::new(move || code)
    }

    /// Create a policy whose default is read from `OUTPUT_LANGUAGE` at each
    /// call, falling back to English when unset or invalid.
    pub fn from_env() -> Self {
        Self::new(|| {
            EngineConfig::from_env()
                .map(|config| config.output_language)
                .unwrap_or(LanguageCode::En)
        })
    }

    /// Resolve the effective language: the explicit argument when given,
    /// otherwise the provider's current default.
    pub fn resolve(&self, language: Option<LanguageCode>) -> LanguageCode {
        language.unwrap_or_else(|| (self.default_provider)())
    }

    /// Language instruction for prose prompts (outline and description
    /// stages). Returns the fixed English instruction for every code; the
    /// resolved code is computed so the table mapping can be reinstated here
    /// without touching callers.
    pub fn prose_instruction(&self, language: Option<LanguageCode>) -> &'static str {
        let _resolved = self.resolve(language);
        PROSE_ENGLISH_OVERRIDE
    }

    /// Language instruction for presentation text (image stages). Returns
    /// the fixed English instruction for every code, mirroring
    /// [`Self::prose_instruction`].
    pub fn deck_text_instruction(&self, language: Option<LanguageCode>) -> &'static str {
        let _resolved = self.resolve(language);
        DECK_TEXT_ENGLISH_OVERRIDE
    }
}

impl Default for LanguagePolicy {
    fn default() -> Self {
        Self::from_env()
    }
}

impl fmt::Debug for LanguagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguagePolicy")
            .field("default", &(self.default_provider)())
            .finish()
    }
}
