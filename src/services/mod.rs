pub mod auth_service;
pub mod career_service;
pub mod chatbot_service;
pub mod course_service;
pub mod gemini;
pub mod questionnaire_service;

pub use career_service::*;
pub use course_service::*;
pub use questionnaire_service::*;
