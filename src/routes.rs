use serde::{Deserialize, Serialize};

use crate::models::user::{Role, User};

/// Superfície de navegação da aplicação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Auth,
    StudentQuestionnaire,
    StudentDashboard,
    TrainerQuestionnaire,
    TrainerDashboard,
    ExploreCourses,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Auth => "/auth",
            Route::StudentQuestionnaire => "/student-questionnaire",
            Route::StudentDashboard => "/student-dashboard",
            Route::TrainerQuestionnaire => "/trainer-questionnaire",
            Route::TrainerDashboard => "/trainer-dashboard",
            Route::ExploreCourses => "/explore-courses",
        }
    }

    /// `None` para caminho desconhecido; quem chama aplica o catch-all (Home)
    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Home),
            "/auth" => Some(Route::Auth),
            "/student-questionnaire" => Some(Route::StudentQuestionnaire),
            "/student-dashboard" => Some(Route::StudentDashboard),
            "/trainer-questionnaire" => Some(Route::TrainerQuestionnaire),
            "/trainer-dashboard" => Some(Route::TrainerDashboard),
            "/explore-courses" => Some(Route::ExploreCourses),
            _ => None,
        }
    }

    pub fn questionnaire_for(role: Role) -> Route {
        match role {
            Role::Student => Route::StudentQuestionnaire,
            Role::Trainer => Route::TrainerQuestionnaire,
        }
    }

    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Student => Route::StudentDashboard,
            Role::Trainer => Route::TrainerDashboard,
        }
    }
}

/// Decisão do guard para uma rota protegida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Sem sessão: manda para /auth guardando a rota de origem
    RedirectToAuth { from: Route },
    RedirectToRoleHome(Route),
    RedirectToQuestionnaire(Route),
}

/// Rota inicial derivada do estado da sessão.
///
/// Anonymous lands on Home; an authenticated user lands on the role's
/// questionnaire until it is completed, then on the role's dashboard.
pub fn resolve_landing_route(user: Option<&User>) -> Route {
    match user {
        None => Route::Home,
        Some(user) if !user.questionnaire_completed => Route::questionnaire_for(user.role),
        Some(user) => Route::dashboard_for(user.role),
    }
}

/// Ponto único de autorização para rotas protegidas.
///
/// Ordem das checagens: sessão ausente, papel não permitido, questionário
/// pendente (a própria rota de questionário do papel fica isenta, inclusive
/// para refazer depois de completo). Quem chama não deve invocar o guard
/// enquanto a sessão ainda está sendo restaurada.
pub fn guard(user: Option<&User>, required_roles: &[Role], current: Route) -> GuardDecision {
    let Some(user) = user else {
        return GuardDecision::RedirectToAuth { from: current };
    };

    if !required_roles.is_empty() && !required_roles.contains(&user.role) {
        return GuardDecision::RedirectToRoleHome(Route::dashboard_for(user.role));
    }

    if !user.questionnaire_completed && current != Route::questionnaire_for(user.role) {
        return GuardDecision::RedirectToQuestionnaire(Route::questionnaire_for(user.role));
    }

    GuardDecision::Allow
}
