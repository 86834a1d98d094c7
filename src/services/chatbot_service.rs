use crate::services::gemini::{self, GeminiConfig, GenerationConfig};
use crate::utils::error::AppError;

/// Limite de tamanho da mensagem do usuário
pub const MAX_MESSAGE_LEN: usize = 500;

const FALLBACK_REPLY: &str = "I couldn't understand that. Could you try again?";

/// Resposta única do assistente para uma mensagem do usuário.
///
/// An empty model answer degrades to a canned reply instead of an error.
pub async fn send_message(config: &GeminiConfig, message: &str) -> Result<String, AppError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidRequest("Message cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::InvalidRequest(format!(
            "Please keep messages under {} characters",
            MAX_MESSAGE_LEN
        )));
    }

    log::info!("💬 Chatbot message ({} chars)", trimmed.chars().count());
    let reply = gemini::generate_content(config, trimmed, Some(GenerationConfig::chat()))
        .await?
        .unwrap_or_else(|| FALLBACK_REPLY.to_string());
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> GeminiConfig {
        GeminiConfig::new(server.uri(), "test-key")
    }

    #[tokio::test]
    async fn test_empty_message_rejected_before_any_request() {
        let server = MockServer::start().await;
        let err = send_message(&config_for(&server), "   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_message_rejected() {
        let server = MockServer::start().await;
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        let err = send_message(&config_for(&server), &long).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_reply_uses_chat_generation_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("maxOutputTokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "Try the web dev course!" }] } }]
            })))
            .mount(&server)
            .await;

        let reply = send_message(&config_for(&server), "what should I learn?")
            .await
            .unwrap();
        assert_eq!(reply, "Try the web dev course!");
    }

    #[tokio::test]
    async fn test_empty_candidates_degrade_to_fallback_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let reply = send_message(&config_for(&server), "hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }
}
