use serde::{Deserialize, Serialize};

/// Trilha de carreira gerada pela IA (armazenada no registro do estudante)
///
/// The shape mirrors the JSON schema the recommendation prompt asks for.
/// Everything beyond the name and description is optional so a thinner
/// response still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    /// Nome da trilha sugerida
    pub path_name: String,

    /// Por que a trilha combina com os hobbies/aspirações
    pub description: String,

    #[serde(default)]
    pub skills_required: Vec<String>,

    #[serde(default)]
    pub potential_roles: Vec<String>,

    #[serde(default)]
    pub estimated_salary_range: Option<String>,

    #[serde(default)]
    pub learning_resources: Option<LearningResources>,

    #[serde(default)]
    pub recommended_trainers: Vec<RecommendedTrainer>,

    #[serde(default)]
    pub suggested_tasks: Vec<SuggestedTask>,

    #[serde(default)]
    pub achievements_and_badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LearningResources {
    #[serde(default)]
    pub online_courses: Vec<OnlineCourse>,

    #[serde(default)]
    pub youtube_videos: Vec<VideoResource>,

    #[serde(default)]
    pub ebooks: Vec<EbookResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineCourse {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResource {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbookResource {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTrainer {
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}
