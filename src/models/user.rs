use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::career_path::CareerPath;

/// Papel do usuário na plataforma (imutável após o cadastro)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Trainer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Trainer => "trainer",
        }
    }
}

// User model
//
// Persisted form keeps the platform's original camelCase field names so data
// written by earlier builds keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String, // Plaintext on purpose: local-only store, see DESIGN.md
    pub role: Role,

    #[serde(default)]
    pub questionnaire_completed: bool,

    // Student profile
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub career_aspirations: String,
    #[serde(default)]
    pub career_path: Option<CareerPath>,

    // Trainer profile
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub linked_in_profile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Request structures
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Shallow-merge partial for profile updates.
///
/// `role`, `email` and `password` have no field here: identity and role are
/// fixed at signup and nothing in the application edits credentials.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub questionnaire_completed: Option<bool>,
    pub hobbies: Option<Vec<String>>,
    pub career_aspirations: Option<String>,
    pub career_path: Option<CareerPath>,
    pub expertise: Option<Vec<String>>,
    pub bio: Option<String>,
    pub experience_years: Option<u32>,
    pub linked_in_profile: Option<String>,
}

impl UserUpdate {
    /// Aplica os campos presentes sobre uma cópia do usuário (merge raso)
    pub fn apply_to(&self, user: &User) -> User {
        let mut merged = user.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(completed) = self.questionnaire_completed {
            merged.questionnaire_completed = completed;
        }
        if let Some(hobbies) = &self.hobbies {
            merged.hobbies = hobbies.clone();
        }
        if let Some(aspirations) = &self.career_aspirations {
            merged.career_aspirations = aspirations.clone();
        }
        if let Some(path) = &self.career_path {
            merged.career_path = Some(path.clone());
        }
        if let Some(expertise) = &self.expertise {
            merged.expertise = expertise.clone();
        }
        if let Some(bio) = &self.bio {
            merged.bio = bio.clone();
        }
        if let Some(years) = self.experience_years {
            merged.experience_years = Some(years);
        }
        if let Some(link) = &self.linked_in_profile {
            merged.linked_in_profile = link.clone();
        }
        merged
    }
}
