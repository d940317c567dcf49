//! Request and response types for the model-client boundary.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// A message in a conversation with the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (e.g., "system", "user", "assistant").
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Request for text generation from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier to use for generation.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// Sampling temperature (0.0 - 2.0). Higher values = more random.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling parameter (0.0 - 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl GenerationRequest {
    /// Create a new generation request with default parameters.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            top_p: None,
        }
    }

    /// Set the temperature for this request.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the max tokens for this request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the top_p for this request.
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// Response from a text-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Unique identifier for this response.
    pub id: String,
    /// Model that generated this response.
    pub model: String,
    /// Generated choices/completions.
    pub choices: Vec<Choice>,
    /// Token usage statistics.
    pub usage: Usage,
}

impl GenerationResponse {
    /// Get the content of the first choice, if available.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single generated choice from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Index of this choice in the response.
    pub index: u32,
    /// Generated message.
    pub message: Message,
    /// Reason the generation stopped (e.g., "stop", "length").
    pub finish_reason: String,
}

/// Token usage statistics for a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,
    /// Number of tokens generated.
    pub completion_tokens: u32,
    /// Total tokens used.
    pub total_tokens: u32,
}

/// One image payload accompanying an image-stage request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Media type of the image (e.g., "image/png").
    pub media_type: String,
    /// Base64-encoded image data.
    pub data: String,
}

impl ImageAttachment {
    /// Create an attachment from raw image bytes.
    pub fn from_bytes(media_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            media_type: media_type.into(),
            data: BASE64.encode(bytes),
        }
    }
}

/// Request for image generation or editing.
///
/// `template` carries the style-template image; `materials` carries the
/// selectable material images referenced by the prompt's material hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The composed image-stage prompt text.
    pub prompt: String,
    /// Style-template image, when the request has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<ImageAttachment>,
    /// Selectable material images, in upload order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<ImageAttachment>,
}

impl ImageRequest {
    /// Create an image request carrying only prompt text.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            template: None,
            materials: Vec::new(),
        }
    }

    /// Attach the style-template image.
    pub fn with_template(mut self, template: ImageAttachment) -> Self {
        self.template = Some(template);
        self
    }

    /// Attach selectable material images.
    pub fn with_materials(mut self, materials: Vec<ImageAttachment>) -> Self {
        self.materials = materials;
        self
    }
}

/// Trait implemented by the external model-invocation collaborator.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a text response for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;

    /// Generate or edit a page image; returns the raw image bytes.
    async fn generate_image(&self, request: ImageRequest) -> Result<Vec<u8>, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, "system");
        assert_eq!(Message::user("u").role, "user");
        assert_eq!(Message::assistant("a").role, "assistant");
        assert_eq!(Message::user("hello").content, "hello");
    }

    #[test]
    fn test_generation_request_builder() {
        let request = GenerationRequest::new("deck-model", vec![Message::user("hi")])
            .with_temperature(0.7)
            .with_max_tokens(2048)
            .with_top_p(0.9);

        assert_eq!(request.model, "deck-model");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(2048));
        assert_eq!(request.top_p, Some(0.9));
    }

    #[test]
    fn test_optional_params_skipped_in_json() {
        let request = GenerationRequest::new("deck-model", vec![]);
        let json = serde_json::to_string(&request).expect("serialize");
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_first_content() {
        let response = GenerationResponse {
            id: "r1".to_string(),
            model: "deck-model".to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant("[]"),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage {
                prompt_tokens: 10,
                completion_tokens: 2,
                total_tokens: 12,
            },
        };
        assert_eq!(response.first_content(), Some("[]"));

        let empty = GenerationResponse {
            choices: vec![],
            ..response
        };
        assert_eq!(empty.first_content(), None);
    }

    #[test]
    fn test_image_attachment_encodes_base64() {
        let attachment = ImageAttachment::from_bytes("image/png", b"\x89PNG");
        assert_eq!(attachment.media_type, "image/png");
        assert_eq!(attachment.data, "iVBORw==");
    }

    #[test]
    fn test_image_request_builder() {
        let request = ImageRequest::new("render page 1")
            .with_template(ImageAttachment::from_bytes("image/png", b"t"))
            .with_materials(vec![ImageAttachment::from_bytes("image/jpeg", b"m")]);

        assert_eq!(request.prompt, "render page 1");
        assert!(request.template.is_some());
        assert_eq!(request.materials.len(), 1);
    }
}
