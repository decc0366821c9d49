use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::Tone;

use super::StoreError;

/// Per-user tone memory: the last tone a user chose, used as the default
/// pre-selection on their next visit.
pub trait ToneStore: Send + Sync {
    fn get(&self, user: &str) -> Result<Option<Tone>, StoreError>;

    fn set(&self, user: &str, tone: Tone) -> Result<(), StoreError>;
}

/// JSON map from username to tone label, rewritten whole on every change.
///
/// Last writer wins; simultaneous writers can lose updates. Accepted
/// limitation, same as the audit logs.
pub struct JsonToneMemory {
    path: PathBuf,
}

impl JsonToneMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ToneStore for JsonToneMemory {
    fn get(&self, user: &str) -> Result<Option<Tone>, StoreError> {
        let map = self.load()?;
        Ok(map.get(user).and_then(|label| Tone::from_label(label)))
    }

    fn set(&self, user: &str, tone: Tone) -> Result<(), StoreError> {
        let mut map = self.load()?;
        map.insert(user.to_string(), tone.label().to_string());
        let content = serde_json::to_string(&map)?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))
    }
}

/// In-memory tone store for tests and fakes.
#[derive(Default)]
pub struct MemoryToneStore {
    map: Mutex<HashMap<String, Tone>>,
}

impl MemoryToneStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToneStore for MemoryToneStore {
    fn get(&self, user: &str) -> Result<Option<Tone>, StoreError> {
        Ok(self.map.lock().expect("tone store poisoned").get(user).copied())
    }

    fn set(&self, user: &str, tone: Tone) -> Result<(), StoreError> {
        self.map
            .lock()
            .expect("tone store poisoned")
            .insert(user.to_string(), tone);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_set_then_get_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone_memory.json");

        let store = JsonToneMemory::new(&path);
        store.set("bob", Tone::LuxuryPremium).unwrap();

        // A fresh handle re-reads the file from scratch
        let reloaded = JsonToneMemory::new(&path);
        assert_eq!(reloaded.get("bob").unwrap(), Some(Tone::LuxuryPremium));
        assert_eq!(reloaded.get("alice").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_previous_choice() {
        let dir = tempdir().unwrap();
        let store = JsonToneMemory::new(dir.path().join("tone_memory.json"));

        store.set("bob", Tone::WarmFriendly).unwrap();
        store.set("bob", Tone::HelpfulTechnical).unwrap();

        assert_eq!(store.get("bob").unwrap(), Some(Tone::HelpfulTechnical));
    }

    #[test]
    fn test_missing_file_means_no_memory() {
        let dir = tempdir().unwrap();
        let store = JsonToneMemory::new(dir.path().join("absent.json"));
        assert_eq!(store.get("bob").unwrap(), None);
    }

    #[test]
    fn test_unknown_label_in_file_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone_memory.json");
        std::fs::write(&path, r#"{"bob": "Sarcastic & Loud"}"#).unwrap();

        let store = JsonToneMemory::new(&path);
        assert_eq!(store.get("bob").unwrap(), None);
    }
}
