use crate::models::career_path::CareerPath;
use crate::models::user::{Role, UserUpdate};
use crate::services::auth_service::SessionGate;
use crate::services::career_service;
use crate::services::gemini::GeminiConfig;
use crate::storage::Storage;
use crate::utils::error::AppError;

/// Hobbies oferecidos no questionário do estudante
pub const HOBBY_OPTIONS: [&str; 22] = [
    "Reading",
    "Writing",
    "Drawing/Painting",
    "Playing Musical Instruments",
    "Singing",
    "Dancing",
    "Photography",
    "Videography",
    "Cooking/Baking",
    "Gardening",
    "Hiking/Camping",
    "Sports (e.g., Soccer, Basketball)",
    "Yoga/Meditation",
    "Gaming (Video/Board)",
    "Coding/Programming",
    "Robotics",
    "Electronics",
    "Debating/Public Speaking",
    "Volunteering",
    "Learning Languages",
    "Collecting (e.g., Stamps, Coins)",
    "DIY Crafts",
];

/// Áreas de especialidade oferecidas no questionário do trainer
pub const EXPERTISE_AREAS: [&str; 20] = [
    "Web Development (Frontend, Backend, Fullstack)",
    "Mobile App Development (iOS, Android, Cross-platform)",
    "Data Science & Machine Learning",
    "Artificial Intelligence",
    "Cybersecurity",
    "Cloud Computing (AWS, Azure, GCP)",
    "DevOps Engineering",
    "UI/UX Design",
    "Digital Marketing (SEO, SEM, Content, Social Media)",
    "Business Analytics",
    "Project Management (Agile, Scrum)",
    "Creative Writing & Content Creation",
    "Graphic Design & Illustration",
    "Photography & Videography",
    "Music Production & Audio Engineering",
    "Language Tutoring (e.g., English, Spanish, French)",
    "Academic Tutoring (Math, Science, History)",
    "Fitness & Wellness Coaching",
    "Culinary Arts & Cooking",
    "Financial Literacy & Investing",
];

/// Formulário do estudante
#[derive(Debug, Clone, Default)]
pub struct StudentQuestionnaire {
    pub selected_hobbies: Vec<String>,
    /// Hobby livre, fora da lista
    pub other_hobby: String,
    pub career_aspirations: String,
}

/// Formulário do trainer
#[derive(Debug, Clone, Default)]
pub struct TrainerQuestionnaire {
    pub selected_expertise: Vec<String>,
    pub other_expertise: String,
    pub bio: String,
    /// Campo de formulário, validado como inteiro não-negativo
    pub experience_years: String,
    pub linked_in_profile: String,
}

// Merges the free-text entry into the selection when it is new
fn merge_other(selected: &[String], other: &str) -> Vec<String> {
    let mut all = selected.to_vec();
    let other = other.trim();
    if !other.is_empty() && !all.iter().any(|item| item == other) {
        all.push(other.to_string());
    }
    all
}

/// Submissão do questionário do estudante.
///
/// Valida, chama a IA e só então marca o questionário como completo. Uma
/// falha na geração deixa o usuário (e qualquer trilha anterior) intocados,
/// então refazer o questionário preserva a trilha antiga até a nova chegar.
pub async fn submit_student_questionnaire<S: Storage>(
    gate: &mut SessionGate<S>,
    config: &GeminiConfig,
    form: &StudentQuestionnaire,
) -> Result<CareerPath, AppError> {
    match gate.current_user() {
        Some(user) if user.role == Role::Student => {}
        _ => {
            return Err(AppError::InvalidRequest(
                "No active student session".to_string(),
            ))
        }
    }

    let hobbies = merge_other(&form.selected_hobbies, &form.other_hobby);
    if hobbies.is_empty() {
        return Err(AppError::InvalidRequest(
            "Please select at least one hobby or enter your own".to_string(),
        ));
    }

    let aspirations = form.career_aspirations.trim().to_string();
    let career_path = career_service::generate_career_path(config, &hobbies, &aspirations).await?;

    gate.update_user(&UserUpdate {
        hobbies: Some(hobbies),
        career_aspirations: Some(aspirations),
        career_path: Some(career_path.clone()),
        questionnaire_completed: Some(true),
        ..Default::default()
    })?;

    log::info!("📋 Student questionnaire submitted");
    Ok(career_path)
}

/// Submissão do questionário do trainer (sem chamada de IA)
pub fn submit_trainer_questionnaire<S: Storage>(
    gate: &mut SessionGate<S>,
    form: &TrainerQuestionnaire,
) -> Result<(), AppError> {
    match gate.current_user() {
        Some(user) if user.role == Role::Trainer => {}
        _ => {
            return Err(AppError::InvalidRequest(
                "No active trainer session".to_string(),
            ))
        }
    }

    let expertise = merge_other(&form.selected_expertise, &form.other_expertise);
    if expertise.is_empty() {
        return Err(AppError::InvalidRequest(
            "Please select at least one area of expertise or enter your own".to_string(),
        ));
    }

    let bio = form.bio.trim().to_string();
    if bio.is_empty() {
        return Err(AppError::InvalidRequest(
            "Please tell students a bit about yourself".to_string(),
        ));
    }

    let experience_years: u32 = form.experience_years.trim().parse().map_err(|_| {
        AppError::InvalidRequest("Please enter a valid number of years for experience".to_string())
    })?;

    gate.update_user(&UserUpdate {
        expertise: Some(expertise),
        bio: Some(bio),
        experience_years: Some(experience_years),
        linked_in_profile: Some(form.linked_in_profile.trim().to_string()),
        questionnaire_completed: Some(true),
        ..Default::default()
    })?;

    log::info!("📋 Trainer questionnaire submitted");
    Ok(())
}
