use std::sync::Mutex;

/// Opaque secure storage for the bearer token.
///
/// The client never inspects storage internals; it only saves, reads and
/// deletes the token. Reads are idempotent and may race a concurrent save;
/// a stale token simply earns a 401 from the server, which is the backstop.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str);
    fn get(&self) -> Option<String>;
    fn delete(&self);
}

/// In-memory token store. Token lives until deletion or process exit.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
    }

    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn delete(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }
}
