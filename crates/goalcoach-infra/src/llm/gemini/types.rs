//! Gemini `generateContent` request body.
//!
//! Only the request side is typed. Responses are parsed as raw JSON and
//! handed to the envelope extractors, since the text can sit under more
//! than one shape.

use serde::Serialize;

use goalcoach_types::llm::GenerationRequest;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl From<&GenerationRequest> for GeminiRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }
}
