use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::log;

pub const HIGH_SCORE_KEY: &str = "torus_snake.high_score";

/// Opaque string store. Values are never interpreted here.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// A YAML mapping of keys to string values kept in a single file.
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        FileStore { file_path: file_path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_yaml_ng::from_str(&content)
                .map_err(|e| format!("Failed to parse store file: {}", e)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(BTreeMap::new()),
                _ => Err(format!("Failed to read store file: {}", err)),
            },
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        // an unreadable file is replaced rather than blocking the write
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        let content = serde_yaml_ng::to_string(&entries)
            .map_err(|e| format!("Failed to serialize store: {}", e))?;
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create store directory: {}", e))?;
        }
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write store file: {}", e))
    }
}

/// The high score as seen through a [`KeyValueStore`].
pub struct HighScoreStore {
    backend: Box<dyn KeyValueStore>,
}

impl HighScoreStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        HighScoreStore { backend }
    }

    /// Missing, unreadable and unparsable records all count as 0.
    pub fn load(&self) -> u32 {
        match self.backend.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log!("Ignoring unparsable high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log!("High score unavailable: {}", e);
                0
            }
        }
    }

    pub fn save(&mut self, high_score: u32) -> Result<(), String> {
        self.backend.set(HIGH_SCORE_KEY, &high_score.to_string())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::KeyValueStore;

    /// Shared in-memory store; clones observe the same entries and write count.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
        writes: Rc<RefCell<usize>>,
    }

    impl MemoryStore {
        pub fn with(key: &str, value: &str) -> Self {
            let store = MemoryStore::default();
            store.entries.borrow_mut().insert(key.to_string(), value.to_string());
            store
        }

        pub fn writes(&self) -> usize {
            *self.writes.borrow()
        }

        pub fn value(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.value(key))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            *self.writes.borrow_mut() += 1;
            Ok(())
        }
    }
}
