use serde::{Deserialize, Serialize};

/// Curso publicado por um trainer (ou entrada do catálogo fixo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub category: String,

    /// Nome do trainer dono do curso
    pub trainer: String,

    #[serde(default)]
    pub rating: f64,

    /// Quantidade de alunos matriculados
    #[serde(default)]
    pub students: u32,

    pub price: String,
    pub image: String,
    pub description: String,
    pub url: String,
}

/// Request para criar curso
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCourseRequest {
    pub title: String,
    pub category: String,
    pub description: String,
    /// Vazio vira "Free"
    #[serde(default)]
    pub price: String,
    /// Vazio vira a imagem padrão
    #[serde(default)]
    pub image: String,
}

/// Conteúdo enviado para um curso (PDF, vídeo ou áudio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    pub id: String,
    pub course_id: String,
    pub expertise_area: String,
    pub file_type: String,
    pub file_url: String,
}

/// Request para enviar conteúdo
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContentRequest {
    pub course_id: String,
    pub expertise_area: String,
    pub file_type: String,
    #[serde(default)]
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_persisted_form_uses_camel_case() {
        let content = CourseContent {
            id: "c1".to_string(),
            course_id: "k1".to_string(),
            expertise_area: "UI/UX Design".to_string(),
            file_type: "PDF".to_string(),
            file_url: "https://example.com/f.pdf".to_string(),
        };
        let raw = serde_json::to_string(&content).unwrap();
        assert!(raw.contains("\"courseId\":\"k1\""));
        assert!(raw.contains("\"expertiseArea\""));
        assert!(raw.contains("\"fileUrl\""));
    }
}
