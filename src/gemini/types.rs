/// Wire types for the Gemini `generateContent` endpoint
///
/// Request and response shapes are typed serde structs rather than
/// ad-hoc JSON so the field names are checked in one place. Everything
/// on the wire is camelCase.

use serde::{Deserialize, Serialize};

use crate::state::data::{AspectRatio, ImageSize};

/// Top-level request body for `models/<model>:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub image_config: ImageConfig,
}

/// The settings chosen in the sidebar, mapped verbatim onto the
/// provider's image configuration fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
    pub image_size: ImageSize,
}

/// Top-level response body. Candidates may be missing entirely when the
/// request was blocked, so every level is optional on the way down.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One response part; image-bearing parts carry `inlineData`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub inline_data: Option<InlineData>,
}

/// Binary image content embedded directly in the response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Media type, e.g. "image/png" or "image/jpeg"; may be absent
    pub mime_type: Option<String>,
    /// Base64-encoded image bytes
    pub data: String,
}
