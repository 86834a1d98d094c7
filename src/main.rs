use std::env;
use std::io::{self, BufRead, Write};

use dotenv::dotenv;

use learn_and_grow::models::course::{NewContentRequest, NewCourseRequest};
use learn_and_grow::models::user::{LoginRequest, Role, SignupRequest};
use learn_and_grow::routes::{guard, resolve_landing_route, GuardDecision, Route};
use learn_and_grow::services::auth_service::SessionGate;
use learn_and_grow::services::gemini::GeminiConfig;
use learn_and_grow::services::questionnaire_service::{
    StudentQuestionnaire, TrainerQuestionnaire,
};
use learn_and_grow::services::{chatbot_service, course_service, questionnaire_service};
use learn_and_grow::storage::{JsonFileStorage, Storage};

#[tokio::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

    log::info!("🚀 Starting Learn & Grow...");
    log::info!("💾 Data dir: {}", data_dir);

    let storage = match JsonFileStorage::new(&data_dir) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("❌ Failed to open data dir: {}", e);
            std::process::exit(1);
        }
    };

    let gemini_config = match GeminiConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("⚠️  {} - AI features disabled", e);
            None
        }
    };

    let mut gate = SessionGate::new(storage.clone());

    // Neutral state while the persisted session restores; nothing is routed
    // before init finishes
    println!("Loading...");
    gate.init();

    let mut current = navigate(&gate, resolve_landing_route(gate.current_user()));
    println!("📍 {}", current.path());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,

            "signup" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.len() != 4 {
                    println!("usage: signup <student|trainer> <name> <email> <password>");
                    continue;
                }
                let (role, name, email, password) = (parts[0], parts[1], parts[2], parts[3]);
                let role = match role {
                    "student" => Role::Student,
                    "trainer" => Role::Trainer,
                    _ => {
                        println!("Role must be 'student' or 'trainer'");
                        continue;
                    }
                };
                match gate.signup(SignupRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    role,
                }) {
                    Ok(user) => println!("Welcome to Learn & Grow, {}!", user.name),
                    Err(e) => println!("❌ {}", e),
                }
                current = navigate(&gate, resolve_landing_route(gate.current_user()));
                println!("📍 {}", current.path());
            }

            "login" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.len() != 2 {
                    println!("usage: login <email> <password>");
                    continue;
                }
                let (email, password) = (parts[0], parts[1]);
                match gate.login(&LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }) {
                    Ok(user) => println!("Welcome back, {}!", user.name),
                    Err(e) => println!("❌ {}", e),
                }
                current = navigate(&gate, resolve_landing_route(gate.current_user()));
                println!("📍 {}", current.path());
            }

            "logout" => {
                gate.logout();
                current = navigate(&gate, Route::Home);
                println!("📍 {}", current.path());
            }

            "whoami" => match gate.current_user() {
                Some(user) => println!(
                    "{} <{}> - {} (questionnaire {})",
                    user.name,
                    user.email,
                    user.role.as_str(),
                    if user.questionnaire_completed { "done" } else { "pending" }
                ),
                None => println!("Not signed in"),
            },

            "go" => {
                // Unknown paths take the catch-all back home
                let target = Route::from_path(rest).unwrap_or(Route::Home);
                current = navigate(&gate, target);
                println!("📍 {}", current.path());
                render(&gate, &storage, current);
            }

            "questionnaire" => {
                let role = match gate.current_user() {
                    Some(user) => user.role,
                    None => {
                        println!("❌ Sign in first");
                        continue;
                    }
                };
                current = navigate(&gate, Route::questionnaire_for(role));
                if current != Route::questionnaire_for(role) {
                    println!("📍 {}", current.path());
                    continue;
                }
                match role {
                    Role::Student => {
                        let Some(config) = gemini_config.as_ref() else {
                            println!("❌ GEMINI_API_KEY must be set for career paths");
                            continue;
                        };
                        let (hobbies, aspirations) = match rest.split_once(' ') {
                            Some((hobbies, aspirations)) => (hobbies, aspirations.trim()),
                            None => (rest, ""),
                        };
                        let form = StudentQuestionnaire {
                            selected_hobbies: csv(hobbies),
                            other_hobby: String::new(),
                            career_aspirations: aspirations.to_string(),
                        };
                        match questionnaire_service::submit_student_questionnaire(
                            &mut gate, config, &form,
                        )
                        .await
                        {
                            Ok(path) => {
                                println!("Your personalized career path is ready: {}", path.path_name)
                            }
                            Err(e) => println!("❌ {}", e),
                        }
                    }
                    Role::Trainer => {
                        let parts: Vec<&str> = rest.splitn(3, ' ').collect();
                        if parts.len() != 3 {
                            println!("usage: questionnaire <expertise,csv> <years> <bio...>");
                            continue;
                        }
                        let form = TrainerQuestionnaire {
                            selected_expertise: csv(parts[0]),
                            other_expertise: String::new(),
                            bio: parts[2].to_string(),
                            experience_years: parts[1].to_string(),
                            linked_in_profile: String::new(),
                        };
                        match questionnaire_service::submit_trainer_questionnaire(&mut gate, &form)
                        {
                            Ok(()) => println!("Your trainer profile is now set up."),
                            Err(e) => println!("❌ {}", e),
                        }
                    }
                }
                current = navigate(&gate, resolve_landing_route(gate.current_user()));
                println!("📍 {}", current.path());
            }

            "courses" => {
                current = navigate(&gate, Route::ExploreCourses);
                if current != Route::ExploreCourses {
                    println!("📍 {}", current.path());
                    continue;
                }
                let (category, search) = match rest.split_once(' ') {
                    Some((category, search)) => (category, search.trim()),
                    None => (if rest.is_empty() { "All" } else { rest }, ""),
                };
                let catalog = course_service::sample_catalog();
                let matches = course_service::filter_catalog(&catalog, category, search);
                if matches.is_empty() {
                    println!("No courses found matching your criteria.");
                }
                for course in matches {
                    println!(
                        "  [{}] {} - {} ({}, ⭐ {}, {} students)",
                        course.category,
                        course.title,
                        course.trainer,
                        course.price,
                        course.rating,
                        course.students
                    );
                }
            }

            "my-courses" => match gate.current_user() {
                Some(user) => {
                    for course in course_service::list_trainer_courses(&storage, user) {
                        println!("  {} - {} ({})", course.id, course.title, course.price);
                    }
                }
                None => println!("❌ Sign in first"),
            },

            "create-course" => match gate.current_user() {
                Some(user) => {
                    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                    if fields.len() < 3 {
                        println!("usage: create-course <title>|<category>|<description>[|price[|image]]");
                        continue;
                    }
                    let request = NewCourseRequest {
                        title: fields[0].to_string(),
                        category: fields[1].to_string(),
                        description: fields[2].to_string(),
                        price: fields.get(3).copied().unwrap_or("").to_string(),
                        image: fields.get(4).copied().unwrap_or("").to_string(),
                    };
                    match course_service::create_course(&storage, user, &request) {
                        Ok(course) => println!("Created course {} ({})", course.title, course.id),
                        Err(e) => println!("❌ {}", e),
                    }
                }
                None => println!("❌ Sign in first"),
            },

            "upload-content" => match gate.current_user() {
                Some(user) => {
                    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                    if fields.len() < 3 {
                        println!("usage: upload-content <course_id>|<area>|<PDF|Video|Audio>[|url]");
                        continue;
                    }
                    let request = NewContentRequest {
                        course_id: fields[0].to_string(),
                        expertise_area: fields[1].to_string(),
                        file_type: fields[2].to_string(),
                        file_url: fields.get(3).copied().unwrap_or("").to_string(),
                    };
                    match course_service::upload_content(&storage, user, &request) {
                        Ok(content) => println!("Uploaded {} content ({})", content.file_type, content.id),
                        Err(e) => println!("❌ {}", e),
                    }
                }
                None => println!("❌ Sign in first"),
            },

            "chat" => {
                let Some(config) = gemini_config.as_ref() else {
                    println!("❌ GEMINI_API_KEY must be set for the assistant");
                    continue;
                };
                match chatbot_service::send_message(config, rest).await {
                    Ok(reply) => println!("🤖 {}", reply),
                    Err(e) => println!("❌ {}", e),
                }
            }

            _ => println!("Unknown command '{}'; type 'help'", command),
        }
    }

    println!("Bye!");
    Ok(())
}

/// Resolve uma rota alvo aplicando o guard até estabilizar
fn navigate<S: Storage>(gate: &SessionGate<S>, target: Route) -> Route {
    let mut current = target;
    loop {
        match current {
            Route::Home => return current,
            Route::Auth => {
                // An authenticated user never sees the auth screen
                if gate.current_user().is_none() {
                    return current;
                }
                current = resolve_landing_route(gate.current_user());
            }
            _ => match guard(gate.current_user(), required_roles(current), current) {
                GuardDecision::Allow => return current,
                GuardDecision::RedirectToAuth { from } => {
                    log::info!("🔒 {} requires authentication", from.path());
                    return Route::Auth;
                }
                GuardDecision::RedirectToRoleHome(route)
                | GuardDecision::RedirectToQuestionnaire(route) => {
                    log::info!("↪️  Redirected to {}", route.path());
                    current = route;
                }
            },
        }
    }
}

// Role requirements per protected route (the route table)
fn required_roles(route: Route) -> &'static [Role] {
    match route {
        Route::StudentQuestionnaire | Route::StudentDashboard => &[Role::Student],
        Route::TrainerQuestionnaire | Route::TrainerDashboard => &[Role::Trainer],
        Route::ExploreCourses => &[Role::Student, Role::Trainer],
        Route::Home | Route::Auth => &[],
    }
}

fn render<S: Storage>(gate: &SessionGate<S>, storage: &S, route: Route) {
    match route {
        Route::StudentDashboard => {
            if let Some(path) = gate.current_user().and_then(|u| u.career_path.as_ref()) {
                println!("🎓 Career path: {}", path.path_name);
                println!("   {}", path.description);
            }
        }
        Route::TrainerDashboard => {
            if let Some(user) = gate.current_user() {
                let courses = course_service::list_trainer_courses(storage, user);
                println!("📚 {} course(s) published", courses.len());
            }
        }
        _ => {}
    }
}

fn csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_help() {
    println!("Commands:");
    println!("  signup <student|trainer> <name> <email> <password>");
    println!("  login <email> <password>");
    println!("  logout | whoami | go <path>");
    println!("  questionnaire <hobbies,csv> [aspirations...]        (student)");
    println!("  questionnaire <expertise,csv> <years> <bio...>      (trainer)");
    println!("  courses [category] [search...]");
    println!("  my-courses | create-course <t>|<cat>|<desc>[|price[|image]]");
    println!("  upload-content <course_id>|<area>|<type>[|url]");
    println!("  chat <message...>");
    println!("  quit");
}
