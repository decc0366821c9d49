pub mod llm;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod web;

pub use llm::{ChatModel, ImageModel, OpenAiClient, OpenAiConfig};
pub use models::{
    CaptionVariant, CritiqueReport, Record, Session, SessionRegistry, Tone,
};
pub use pipeline::{
    execute_content, execute_review, validate_prompt, ContentOutcome, PipelineError,
    ReviewOutcome, ValidationReport,
};
pub use store::{
    recent_for_user, rows_for_user, CsvLog, HistoryError, JsonToneMemory, LogStore, MemoryLog,
    MemoryToneStore, StoreError, ToneStore, RECENT_LIMIT,
};
pub use web::{build_router, AppState, StudioApp};
