pub mod content;
pub mod review;
pub mod stylist;

pub use content::*;
pub use review::*;
pub use stylist::*;

use thiserror::Error;

/// Conditions that abort a generation request.
///
/// A failed stage produces no partial output and no audit row. Nothing here
/// is retried; the web layer renders the message inline and moves on.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The submitted prompt was empty after trimming. Raised before any
    /// external call is made.
    #[error("prompt text is required")]
    EmptyPrompt,

    /// An external generation call failed.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// An external call succeeded but returned nothing usable.
    #[error("{stage} stage returned an empty response")]
    EmptyResponse { stage: &'static str },
}
