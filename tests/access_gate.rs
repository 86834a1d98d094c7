use learn_and_grow::models::user::{LoginRequest, Role, SignupRequest};
use learn_and_grow::routes::{guard, resolve_landing_route, GuardDecision, Route};
use learn_and_grow::services::gemini::GeminiConfig;
use learn_and_grow::services::questionnaire_service::{
    self, StudentQuestionnaire, TrainerQuestionnaire,
};
use learn_and_grow::storage::{MemoryStorage, Storage, SESSION_KEY};
use learn_and_grow::SessionGate;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signup(email: &str, role: Role) -> SignupRequest {
    SignupRequest {
        name: "Alex".to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        role,
    }
}

#[test]
fn trainer_signup_to_dashboard_flow() {
    let mut gate = SessionGate::new(MemoryStorage::new());
    gate.init();

    // Sign up a trainer
    gate.signup(signup("a@x.com", Role::Trainer)).unwrap();
    let user = gate.current_user().unwrap();
    assert_eq!(user.role, Role::Trainer);
    assert!(!user.questionnaire_completed);

    // Dashboard is gated behind the questionnaire
    assert_eq!(
        guard(gate.current_user(), &[Role::Trainer], Route::TrainerDashboard),
        GuardDecision::RedirectToQuestionnaire(Route::TrainerQuestionnaire)
    );
    assert_eq!(
        resolve_landing_route(gate.current_user()),
        Route::TrainerQuestionnaire
    );

    // Submit the trainer profile
    questionnaire_service::submit_trainer_questionnaire(
        &mut gate,
        &TrainerQuestionnaire {
            selected_expertise: vec!["DevOps Engineering".to_string()],
            other_expertise: String::new(),
            bio: "Ten years of infrastructure work.".to_string(),
            experience_years: "10".to_string(),
            linked_in_profile: String::new(),
        },
    )
    .unwrap();

    // Dashboard now opens
    assert!(gate.current_user().unwrap().questionnaire_completed);
    assert_eq!(
        guard(gate.current_user(), &[Role::Trainer], Route::TrainerDashboard),
        GuardDecision::Allow
    );
    assert_eq!(
        resolve_landing_route(gate.current_user()),
        Route::TrainerDashboard
    );
}

#[tokio::test]
async fn student_signup_to_dashboard_flow_with_generated_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text":
                r#"{"path_name": "Robotics Engineer", "description": "Build things that move."}"#
            }] } }]
        })))
        .mount(&server)
        .await;
    let config = GeminiConfig::new(server.uri(), "test-key");

    let mut gate = SessionGate::new(MemoryStorage::new());
    gate.init();
    gate.signup(signup("s@x.com", Role::Student)).unwrap();

    assert_eq!(
        resolve_landing_route(gate.current_user()),
        Route::StudentQuestionnaire
    );
    // The questionnaire route itself is reachable while incomplete
    assert_eq!(
        guard(gate.current_user(), &[Role::Student], Route::StudentQuestionnaire),
        GuardDecision::Allow
    );

    questionnaire_service::submit_student_questionnaire(
        &mut gate,
        &config,
        &StudentQuestionnaire {
            selected_hobbies: vec!["Robotics".to_string(), "Electronics".to_string()],
            other_hobby: String::new(),
            career_aspirations: "build robots".to_string(),
        },
    )
    .await
    .unwrap();

    let user = gate.current_user().unwrap();
    assert_eq!(
        user.career_path.as_ref().unwrap().path_name,
        "Robotics Engineer"
    );
    assert_eq!(resolve_landing_route(Some(user)), Route::StudentDashboard);
    assert_eq!(
        guard(Some(user), &[Role::Student], Route::StudentDashboard),
        GuardDecision::Allow
    );
    // Explore is open to any authenticated, completed role
    assert_eq!(
        guard(Some(user), &[Role::Student, Role::Trainer], Route::ExploreCourses),
        GuardDecision::Allow
    );
}

#[test]
fn session_survives_process_restart() {
    let storage = MemoryStorage::new();

    let mut first = SessionGate::new(storage.clone());
    first.init();
    first.signup(signup("a@x.com", Role::Student)).unwrap();
    drop(first);

    // A fresh gate over the same store restores the session on init
    let mut second = SessionGate::new(storage.clone());
    assert!(second.is_initializing());
    second.init();
    assert_eq!(second.current_user().unwrap().email, "a@x.com");
}

#[test]
fn logout_then_login_preserves_completion_flag() {
    let mut gate = SessionGate::new(MemoryStorage::new());
    gate.init();
    gate.signup(signup("t@x.com", Role::Trainer)).unwrap();
    questionnaire_service::submit_trainer_questionnaire(
        &mut gate,
        &TrainerQuestionnaire {
            selected_expertise: vec!["Cybersecurity".to_string()],
            other_expertise: String::new(),
            bio: "bio".to_string(),
            experience_years: "3".to_string(),
            linked_in_profile: String::new(),
        },
    )
    .unwrap();

    gate.logout();
    assert_eq!(resolve_landing_route(gate.current_user()), Route::Home);

    gate.login(&LoginRequest {
        email: "t@x.com".to_string(),
        password: "secret".to_string(),
    })
    .unwrap();
    // The stored record kept its flag through logout
    assert!(gate.current_user().unwrap().questionnaire_completed);
    assert_eq!(
        resolve_landing_route(gate.current_user()),
        Route::TrainerDashboard
    );
}

#[test]
fn corrupt_session_record_recovers_to_anonymous() {
    let storage = MemoryStorage::new();
    storage.set_item(SESSION_KEY, "][ definitely not json").unwrap();

    let mut gate = SessionGate::new(storage.clone());
    gate.init();
    assert!(gate.current_user().is_none());
    assert_eq!(storage.get_item(SESSION_KEY).unwrap(), None);
    assert_eq!(resolve_landing_route(gate.current_user()), Route::Home);
    assert_eq!(
        guard(gate.current_user(), &[Role::Student], Route::StudentDashboard),
        GuardDecision::RedirectToAuth {
            from: Route::StudentDashboard
        }
    );
}
