use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::utils::error::AppError;

/// Chave da sessão ativa (um único registro de usuário, ou ausente)
pub const SESSION_KEY: &str = "learnAndGrowUser";

/// Chave do conjunto de todos os usuários (ordem de inserção = ordem de cadastro)
pub const ALL_USERS_KEY: &str = "learnAndGrowAllUsers";

/// Chave dos cursos de um trainer específico
pub fn trainer_courses_key(email: &str) -> String {
    format!("trainerCourses_{}", email)
}

/// Chave dos conteúdos enviados por um trainer específico
pub fn trainer_content_key(email: &str) -> String {
    format!("trainerContent_{}", email)
}

/// Pluggable key/value store holding JSON documents as strings.
///
/// Decoding is the caller's concern: malformed content under a key is treated
/// as absent by callers, never as a fatal condition. Writes are synchronous
/// write-through, there is no write queue.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
}

/// Store persistente local: um arquivo JSON por chave dentro de um diretório
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::StorageError(format!("Failed to create data dir: {}", e)))?;
        Ok(Self { dir })
    }

    // Keys may carry emails; anything path-hostile becomes '_'
    fn file_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl Storage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StorageError(format!(
                "Failed to read '{}': {}",
                key, e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::write(self.file_for(key), value)
            .map_err(|e| AppError::StorageError(format!("Failed to write '{}': {}", key, e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(format!(
                "Failed to remove '{}': {}",
                key, e
            ))),
        }
    }
}

/// Store volátil em memória, para testes e sessões efêmeras
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let items = self
            .items
            .read()
            .map_err(|e| AppError::StorageError(format!("Lock poisoned: {}", e)))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| AppError::StorageError(format!("Lock poisoned: {}", e)))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| AppError::StorageError(format!("Lock poisoned: {}", e)))?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("missing").unwrap(), None);

        storage.set_item("k", "{\"a\":1}").unwrap();
        assert_eq!(storage.get_item("k").unwrap().unwrap(), "{\"a\":1}");

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        // Removing again is fine
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn test_memory_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("shared", "1").unwrap();
        assert_eq!(other.get_item("shared").unwrap().unwrap(), "1");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();

        assert_eq!(storage.get_item(SESSION_KEY).unwrap(), None);
        storage.set_item(SESSION_KEY, "{\"email\":\"a@x.com\"}").unwrap();
        assert_eq!(
            storage.get_item(SESSION_KEY).unwrap().unwrap(),
            "{\"email\":\"a@x.com\"}"
        );

        storage.remove_item(SESSION_KEY).unwrap();
        assert_eq!(storage.get_item(SESSION_KEY).unwrap(), None);
        storage.remove_item(SESSION_KEY).unwrap();
    }

    #[test]
    fn test_file_key_with_email_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();

        let key = trainer_courses_key("a/b@x.com");
        storage.set_item(&key, "[]").unwrap();
        assert_eq!(storage.get_item(&key).unwrap().unwrap(), "[]");
        // Nothing escaped the data dir
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
