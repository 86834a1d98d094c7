use crate::models::career_path::CareerPath;
use crate::services::gemini::{self, GeminiConfig, GenerationConfig};
use crate::utils::error::AppError;

/// Gera a trilha de carreira a partir dos hobbies (e aspirações, se houver).
///
/// One-shot request, no retry: a failure surfaces to the caller and the user
/// resubmits manually.
pub async fn generate_career_path(
    config: &GeminiConfig,
    hobbies: &[String],
    career_aspirations: &str,
) -> Result<CareerPath, AppError> {
    log::info!(
        "🎯 Generating career path from {} hobbies via {}",
        hobbies.len(),
        gemini::GEMINI_MODEL
    );

    let prompt = build_career_prompt(hobbies, career_aspirations);
    let text = gemini::generate_content(config, &prompt, Some(GenerationConfig::json_response()))
        .await?
        .ok_or_else(|| {
            AppError::BadPayload("Could not extract career path from AI response".to_string())
        })?;

    let path = parse_career_path(&text)?;
    log::info!("✅ Career path generated: {}", path.path_name);
    Ok(path)
}

/// Decodifica o JSON devolvido pelo modelo
pub fn parse_career_path(raw: &str) -> Result<CareerPath, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        let excerpt: String = raw.chars().take(200).collect();
        AppError::BadPayload(format!("Invalid JSON response from AI ({}): {}...", e, excerpt))
    })
}

// The instruction block mirrors the recommendation contract: a single JSON
// object, no markdown fences, real resources with direct links.
fn build_career_prompt(hobbies: &[String], career_aspirations: &str) -> String {
    let aspirations_clause = if career_aspirations.is_empty() {
        String::new()
    } else {
        format!(" and career aspirations: \"{}\"", career_aspirations)
    };

    format!(
        r##"Based on the following hobbies: {}{}, generate a comprehensive career path suggestion.
The response MUST be a valid JSON object. Do NOT include any markdown formatting like ```json or ``` at the beginning or end of the JSON output.
The JSON object should have the following structure:
{{
  "path_name": "Suggested Career Path Name",
  "description": "A brief description of why this career is suitable based on the hobbies and aspirations. This should be engaging and encouraging.",
  "skills_required": [
    "Essential Skill 1 (e.g., JavaScript)",
    "Essential Skill 2 (e.g., Problem Solving)",
    "Essential Skill 3 (e.g., UI/UX Basics)"
  ],
  "potential_roles": [
    "Entry-Level Role Example",
    "Mid-Level Role Example",
    "Senior-Level Role Example"
  ],
  "estimated_salary_range": "e.g., $50,000 - $70,000 (Entry Level)",
  "learning_resources": {{
    "online_courses": [
      {{ "title": "Real Existing Online Course Name", "link": "https://www.example.com/course", "platform": "Udemy" }}
    ],
    "youtube_videos": [
      {{ "title": "Specific & Real YouTube Video Title", "link": "https://www.youtube.com/watch?v=example" }}
    ],
    "ebooks": [
      {{ "title": "Real E-book Title", "link": "https://www.example.com/ebook", "author": "Author Name" }}
    ]
  }},
  "recommended_trainers": [
    {{ "name": "John Doe (Placeholder)", "specialization": "Web Development Expert", "contact_info": "johndoe@example.com (placeholder)", "profile_url": "#" }}
  ],
  "suggested_tasks": [
    {{ "title": "Actionable Task Title", "description": "What to do.", "difficulty": "Beginner" }}
  ],
  "achievements_and_badges": [
    {{ "name": "Badge Name", "description": "What earns it.", "icon": "Code" }}
  ]
}}
Ensure all recommended courses, YouTube videos, and e-books are real, existing resources and provide direct, valid URLs.
Trainer recommendations can be placeholders for now.
Tasks should be actionable and progress in difficulty.
Achievements should be motivating.
The entire output must be a single, valid JSON object."##,
        hobbies.join(", "),
        aspirations_clause
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PATH_JSON: &str =
        r#"{"path_name": "Game Developer", "description": "Gaming hobby detected."}"#;

    fn hobbies(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_includes_hobbies_and_conditional_aspirations() {
        let prompt = build_career_prompt(&hobbies(&["Reading", "Robotics"]), "");
        assert!(prompt.contains("Reading, Robotics"));
        assert!(!prompt.contains("career aspirations:"));

        let prompt = build_career_prompt(&hobbies(&["Reading"]), "become a teacher");
        assert!(prompt.contains("career aspirations: \"become a teacher\""));
    }

    #[test]
    fn test_parse_rejects_non_json_with_excerpt() {
        let err = parse_career_path("```json not really").unwrap_err();
        match err {
            AppError::BadPayload(msg) => assert!(msg.contains("```json not really")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_career_path_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!(
                "/models/{}:generateContent",
                gemini::GEMINI_MODEL
            )))
            .and(body_string_contains("responseMimeType"))
            .and(body_string_contains("Gaming (Video/Board)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": PATH_JSON }] } }]
            })))
            .mount(&server)
            .await;

        let config = GeminiConfig::new(server.uri(), "test-key");
        let path = generate_career_path(&config, &hobbies(&["Gaming (Video/Board)"]), "")
            .await
            .unwrap();
        assert_eq!(path.path_name, "Game Developer");
    }

    #[tokio::test]
    async fn test_unparseable_inner_payload_is_bad_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "sorry, here is prose" }] } }]
            })))
            .mount(&server)
            .await;

        let config = GeminiConfig::new(server.uri(), "test-key");
        let err = generate_career_path(&config, &hobbies(&["Reading"]), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadPayload(_)));
    }

    #[tokio::test]
    async fn test_missing_candidates_is_bad_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let config = GeminiConfig::new(server.uri(), "test-key");
        let err = generate_career_path(&config, &hobbies(&["Reading"]), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadPayload(_)));
    }
}
