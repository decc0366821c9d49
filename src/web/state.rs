use std::path::Path;
use std::sync::Arc;

use crate::llm::{ChatModel, ImageModel};
use crate::models::{ContentRecord, RewriteRecord, SessionRegistry, StylistRecord};
use crate::store::{CsvLog, JsonToneMemory, LogStore, ToneStore};

/// Everything the handlers need, wired once at startup and cloned per
/// request. Clients and stores sit behind trait objects so tests can swap
/// in scripted models and in-memory stores.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatModel>,
    pub image: Arc<dyn ImageModel>,
    pub sessions: SessionRegistry,
    pub content_log: Arc<dyn LogStore<ContentRecord>>,
    pub stylist_log: Arc<dyn LogStore<StylistRecord>>,
    pub rewrite_log: Arc<dyn LogStore<RewriteRecord>>,
    pub tones: Arc<dyn ToneStore>,
}

impl AppState {
    /// Production wiring: one flat file per app under `data_dir`, plus the
    /// shared tone memory.
    pub fn file_backed(
        chat: Arc<dyn ChatModel>,
        image: Arc<dyn ImageModel>,
        data_dir: &Path,
    ) -> Self {
        Self {
            chat,
            image,
            sessions: SessionRegistry::new(),
            content_log: Arc::new(CsvLog::new(data_dir.join("sessions.csv"))),
            stylist_log: Arc::new(CsvLog::new(data_dir.join("session_log.csv"))),
            rewrite_log: Arc::new(CsvLog::new(data_dir.join("review_log.csv"))),
            tones: Arc::new(JsonToneMemory::new(data_dir.join("tone_memory.json"))),
        }
    }
}
