/// Generation request service
///
/// One outbound call per accepted submission: POST the prompt and the
/// image configuration to the Gemini `generateContent` endpoint and
/// extract every inline-image part from the response. No retries, no
/// internal timeout; a hung provider keeps the generation slot in
/// Submitting, which the UI reflects.

use base64::Engine;
use thiserror::Error;

use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    TextPart,
};
use crate::state::data::{GenerationSettings, ImagePayload};

/// The image model this application is built around
pub const MODEL_NAME: &str = "gemini-3-pro-image-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Media type assumed when a part carries image data but no mimeType
const DEFAULT_MIME_TYPE: &str = "image/png";

/// Failure modes of a single generation call.
/// Clone because these travel inside application messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Request never produced a response (connect, DNS, TLS, ...)
    #[error("request to the image model failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("image model returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not parse as the expected shape
    #[error("could not parse the model response: {0}")]
    InvalidResponse(String),

    /// A part declared inline data that was not valid base64
    #[error("could not decode inline image data: {0}")]
    InvalidImageData(String),

    /// A successful response that contained no inline-image part.
    /// Distinct from a transport failure: the call worked, the model
    /// just returned nothing renderable.
    #[error("no image data found in response")]
    NoImageData,
}

/// Build the HTTP client for one call.
///
/// A fresh client is constructed per call on purpose: the user may have
/// re-selected their API key since the previous request, and the new
/// credential must be picked up. The key travels as an explicit
/// `generate_images` argument, never a cached module-level singleton.
fn build_client() -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| GenerationError::Transport(e.to_string()))
}

/// Generate images for a prompt.
///
/// The caller guarantees `prompt` is non-empty after trimming (the
/// session guards submission); settings are mapped verbatim into the
/// provider's image configuration.
pub async fn generate_images(
    api_key: String,
    prompt: String,
    settings: GenerationSettings,
) -> Result<Vec<ImagePayload>, GenerationError> {
    let client = build_client()?;
    let url = format!("{}/{}:generateContent", API_BASE, MODEL_NAME);

    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![TextPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
            image_config: ImageConfig {
                aspect_ratio: settings.aspect_ratio,
                image_size: settings.image_size,
            },
        },
    };

    println!(
        "🎨 Requesting {} image ({}, {})",
        MODEL_NAME,
        settings.aspect_ratio.as_str(),
        settings.image_size.as_str()
    );

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| GenerationError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GenerationError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(GenerationError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let parsed: GenerateContentResponse = serde_json::from_str(&body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    extract_images(parsed)
}

/// Pull every inline-image part out of a parsed response.
///
/// Each part becomes a payload of decoded bytes plus its declared media
/// type (PNG when unspecified). A response with zero image parts is an
/// error, never an empty success.
pub fn extract_images(
    response: GenerateContentResponse,
) -> Result<Vec<ImagePayload>, GenerationError> {
    let mut payloads = Vec::new();

    for candidate in response.candidates {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            let Some(inline) = part.inline_data else {
                continue;
            };
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(inline.data.trim())
                .map_err(|e| GenerationError::InvalidImageData(e.to_string()))?;
            payloads.push(ImagePayload {
                bytes,
                mime_type: inline.mime_type.unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            });
        }
    }

    if payloads.is_empty() {
        return Err(GenerationError::NoImageData);
    }

    Ok(payloads)
}
