use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Modelo usado em todas as chamadas
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Endpoint + credencial da Generative Language API.
///
/// Built once at startup from the environment; tests point `api_base` at a
/// local mock server instead.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub api_key: String,
}

impl GeminiConfig {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::ConfigError("GEMINI_API_KEY must be set".to_string()))?;
        let api_base =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_API_BASE.to_string());
        Ok(Self { api_base, api_key })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Força resposta JSON pura (sem cercas de markdown)
    pub fn json_response() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn chat() -> Self {
        Self {
            response_mime_type: None,
            temperature: Some(0.7),
            max_output_tokens: Some(256),
        }
    }
}

// Request envelope: contents[].parts[].text (+ generationConfig)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

// Response envelope: candidates[0].content.parts[0].text
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Uma chamada generateContent; devolve o texto do primeiro candidato.
///
/// `Ok(None)` means the API answered 2xx but produced no candidate text;
/// callers decide whether that is a bad payload or a degraded reply.
pub async fn generate_content(
    config: &GeminiConfig,
    prompt: &str,
    generation_config: Option<GenerationConfig>,
) -> Result<Option<String>, AppError> {
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        config.api_base.trim_end_matches('/'),
        GEMINI_MODEL,
        config.api_key
    );

    let body = GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: prompt.to_string(),
            }],
        }],
        generation_config,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .json(&body)
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Failed to reach Gemini API: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(AppError::ExternalServiceError(format!(
            "API request failed with status {}: {}",
            status.as_u16(),
            detail
        )));
    }

    let data: GenerateContentResponse = response
        .json()
        .await
        .map_err(|e| AppError::BadPayload(format!("Failed to parse Gemini response: {}", e)))?;

    Ok(data
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text))
}
