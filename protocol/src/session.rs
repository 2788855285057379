use std::collections::HashMap;

/// Key under which in-flight games are persisted between requests.
pub const GAME_SESSION_KEY: &str = "memorito:game";

/// Key under which a component persists itself in session storage.
pub trait SessionKey {
    const KEY: &'static str;
}

/// Keyed blob storage handed to the game orchestration. Implementations are
/// last-write-wins; concurrent writers are not coordinated here.
pub trait SessionStore {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, value: String);
    fn clear(&mut self, key: &str);
}

/// Process-local store, for tests and single-process tools.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
