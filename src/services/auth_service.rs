use chrono::Utc;

use crate::models::user::{LoginRequest, SignupRequest, User, UserUpdate};
use crate::storage::{Storage, ALL_USERS_KEY, SESSION_KEY};
use crate::utils::error::AppError;

/// Session & Access Gate: estado da sessão ativa + operações de conta.
///
/// Holds the single current-user record and writes every mutation through to
/// the backing store (session copy + all-users set) synchronously. The store
/// is never touched by any other component.
pub struct SessionGate<S: Storage> {
    storage: S,
    current_user: Option<User>,
    initializing: bool,
}

impl<S: Storage> SessionGate<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current_user: None,
            initializing: true,
        }
    }

    /// One-shot session restore.
    ///
    /// A malformed persisted record is discarded (key removed) and the gate
    /// falls back to no session; nothing here is fatal. The initializing flag
    /// clears exactly once, whatever the outcome, and later calls are no-ops.
    pub fn init(&mut self) {
        if !self.initializing {
            return;
        }

        match self.storage.get_item(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    log::info!("🔓 Session restored: {}", user.email);
                    self.current_user = Some(user);
                }
                Err(e) => {
                    log::warn!("⚠️  Failed to parse stored session, discarding: {}", e);
                    if let Err(e) = self.storage.remove_item(SESSION_KEY) {
                        log::warn!("⚠️  Could not discard corrupt session: {}", e);
                    }
                }
            },
            Ok(None) => {}
            Err(e) => log::warn!("⚠️  Could not read stored session: {}", e),
        }

        self.initializing = false;
    }

    /// True until [`init`](Self::init) has run; callers hold a neutral
    /// loading state and must not route while this is set.
    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    // User login
    pub fn login(&mut self, request: &LoginRequest) -> Result<User, AppError> {
        let users = self.load_all_users();

        let found = users
            .into_iter()
            .find(|u| u.email == request.email && u.password == request.password)
            .ok_or(AppError::InvalidCredentials)?;

        log::info!("✅ Login successful: {}", found.email);
        self.persist_session(found.clone())?;
        Ok(found)
    }

    // User registration
    pub fn signup(&mut self, request: SignupRequest) -> Result<User, AppError> {
        let mut users = self.load_all_users();

        // Check if user already exists (email é a chave única)
        if users.iter().any(|u| u.email == request.email) {
            return Err(AppError::DuplicateUser(request.email));
        }

        let now = Utc::now();
        let new_user = User {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
            questionnaire_completed: false,
            hobbies: Vec::new(),
            career_aspirations: String::new(),
            career_path: None,
            expertise: Vec::new(),
            bio: String::new(),
            experience_years: None,
            linked_in_profile: String::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        users.push(new_user.clone());
        self.save_all_users(&users)?;

        log::info!(
            "✅ User registered successfully: {} ({})",
            new_user.email,
            new_user.role.as_str()
        );

        self.persist_session(new_user.clone())?;
        Ok(new_user)
    }

    /// Encerra a sessão (idempotente). O registro em all-users permanece.
    pub fn logout(&mut self) {
        if self.current_user.take().is_some() {
            log::info!("👋 Session closed");
        }
        if let Err(e) = self.storage.remove_item(SESSION_KEY) {
            log::warn!("⚠️  Could not remove stored session: {}", e);
        }
    }

    /// Shallow-merges `update` into the current user.
    ///
    /// No active session is a silent no-op. An update whose merged result
    /// equals the current record skips all writes; otherwise the session copy
    /// and the matching all-users entry are both persisted.
    pub fn update_user(&mut self, update: &UserUpdate) -> Result<(), AppError> {
        let Some(current) = self.current_user.as_ref() else {
            log::debug!("update_user without an active session, ignoring");
            return Ok(());
        };

        let mut merged = update.apply_to(current);
        if merged == *current {
            return Ok(());
        }
        merged.updated_at = Some(Utc::now());

        let raw = serde_json::to_string(&merged)
            .map_err(|e| AppError::StorageError(format!("Failed to encode session: {}", e)))?;
        self.storage.set_item(SESSION_KEY, &raw)?;

        let mut users = self.load_all_users();
        if let Some(entry) = users.iter_mut().find(|u| u.email == merged.email) {
            *entry = merged.clone();
            self.save_all_users(&users)?;
        }

        self.current_user = Some(merged);
        Ok(())
    }

    // Conjunto completo de usuários; conteúdo ilegível vale como vazio
    fn load_all_users(&self) -> Vec<User> {
        match self.storage.get_item(ALL_USERS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(users) => users,
                Err(e) => {
                    log::warn!("⚠️  Failed to parse stored users, treating as empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("⚠️  Could not read stored users: {}", e);
                Vec::new()
            }
        }
    }

    fn save_all_users(&self, users: &[User]) -> Result<(), AppError> {
        let raw = serde_json::to_string(users)
            .map_err(|e| AppError::StorageError(format!("Failed to encode users: {}", e)))?;
        self.storage.set_item(ALL_USERS_KEY, &raw)
    }

    fn persist_session(&mut self, user: User) -> Result<(), AppError> {
        let raw = serde_json::to_string(&user)
            .map_err(|e| AppError::StorageError(format!("Failed to encode session: {}", e)))?;
        self.storage.set_item(SESSION_KEY, &raw)?;
        self.current_user = Some(user);
        Ok(())
    }
}
