/// Gemini image generation module
///
/// This module handles:
/// - Wire types for the generateContent request/response (types.rs)
/// - The single-call generation service and its error taxonomy (client.rs)

pub mod client;
pub mod types;
