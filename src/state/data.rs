/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the generation service and the UI layer.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aspect ratio of a generated image, serialized to the provider's
/// "W:H" strings verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    /// All ratios the model accepts, in sidebar order
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Tall,
        AspectRatio::Wide,
    ];

    /// The exact string the provider expects in `imageConfig.aspectRatio`
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output resolution tier, serialized to the provider's "1K"/"2K"/"4K"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageSize {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    /// All sizes the model accepts, in sidebar order
    pub const ALL: [ImageSize; 3] = [ImageSize::OneK, ImageSize::TwoK, ImageSize::FourK];

    /// The exact string the provider expects in `imageConfig.imageSize`
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings snapshot taken at submission time.
/// The sidebar mutates a live copy at any time, including mid-generation;
/// changes only take effect on the next submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    pub aspect_ratio: AspectRatio,
    pub image_size: ImageSize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Square,
            image_size: ImageSize::OneK,
        }
    }
}

/// One inline image extracted from a provider response:
/// decoded bytes plus the declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    /// Encode as a self-contained `data:` URI, renderable with no
    /// external fetch
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

/// A single generated image in the gallery
///
/// Created only from a successful generation, never mutated afterwards,
/// removed only by an explicit user delete.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// Opaque unique id (UUID v4)
    pub id: String,
    /// Self-contained data URI for the image content
    pub url: String,
    /// The exact prompt text this image was generated from
    pub prompt: String,
    /// Aspect ratio requested for this image
    pub aspect_ratio: AspectRatio,
    /// Resolution tier requested for this image
    pub size: ImageSize,
    /// When the generation completed
    pub created_at: DateTime<Utc>,
}

impl GeneratedImage {
    /// Build a gallery entry from one provider payload plus the
    /// submission that produced it
    pub fn from_payload(payload: &ImagePayload, prompt: &str, settings: GenerationSettings) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: payload.to_data_uri(),
            prompt: prompt.to_string(),
            aspect_ratio: settings.aspect_ratio,
            size: settings.image_size,
            created_at: Utc::now(),
        }
    }

    /// Decode the data URI back to raw bytes for rendering or saving.
    /// Returns None if the URL is not a well-formed data URI.
    pub fn decoded_bytes(&self) -> Option<Vec<u8>> {
        let encoded = self.url.split(";base64,").nth(1)?;
        base64::engine::general_purpose::STANDARD.decode(encoded).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_round_trip() {
        let payload = ImagePayload {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            mime_type: "image/png".to_string(),
        };

        let uri = payload.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));

        let image =
            GeneratedImage::from_payload(&payload, "a red fox", GenerationSettings::default());
        assert_eq!(image.decoded_bytes().unwrap(), payload.bytes);
        assert_eq!(image.prompt, "a red fox");
    }

    #[test]
    fn test_settings_serialize_to_provider_strings() {
        assert_eq!(serde_json::to_string(&AspectRatio::Wide).unwrap(), "\"16:9\"");
        assert_eq!(serde_json::to_string(&ImageSize::TwoK).unwrap(), "\"2K\"");
        assert_eq!(AspectRatio::Tall.as_str(), "9:16");
        assert_eq!(ImageSize::FourK.as_str(), "4K");
    }

    #[test]
    fn test_decoded_bytes_rejects_non_data_uri() {
        let image = GeneratedImage {
            id: "x".to_string(),
            url: "https://example.com/image.png".to_string(),
            prompt: String::new(),
            aspect_ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            created_at: Utc::now(),
        };
        assert!(image.decoded_bytes().is_none());
    }
}
