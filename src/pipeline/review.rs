use tracing::debug;

use crate::llm::{build_critique_prompt, build_edit_prompt, build_rewrite_prompt, tone_prompt, ChatModel};
use crate::models::{CritiqueReport, Tone};

use super::PipelineError;

/// Output of the four-stage review pipeline.
///
/// Every intermediate artifact is kept: the draft and critique feed the next
/// stage verbatim, and the caller logs the critique text exactly as returned.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// Stage 1: synthesized tone instruction.
    pub tone_prompt: String,
    /// Stage 2: rewritten draft.
    pub draft: String,
    /// Stage 3: critique text, verbatim.
    pub critique_text: String,
    /// Parsed view of the critique for display.
    pub critique: CritiqueReport,
    /// Stage 4: final edited review.
    pub final_text: String,
}

/// Execute the review pipeline: tone-prompt synthesis, rewrite, critique, edit.
///
/// Stages run strictly in sequence and stage N's input is stage N-1's output,
/// verbatim. Any stage failure aborts the whole request.
pub async fn execute_review(
    chat: &dyn ChatModel,
    review: &str,
    tone: Tone,
) -> Result<ReviewOutcome, PipelineError> {
    let review = review.trim();
    if review.is_empty() {
        return Err(PipelineError::EmptyPrompt);
    }

    // Stage 1: deterministic template, no external call
    let tone_prompt = tone_prompt(tone);

    let draft = run_stage(chat, "rewrite", &build_rewrite_prompt(review, &tone_prompt)).await?;

    let critique_text = run_stage(chat, "critique", &build_critique_prompt(&draft)).await?;
    let critique = CritiqueReport::parse(&critique_text);

    let final_text = run_stage(chat, "edit", &build_edit_prompt(&draft, &critique_text)).await?;

    Ok(ReviewOutcome {
        tone_prompt,
        draft,
        critique_text,
        critique,
        final_text,
    })
}

/// One external chat call wrapped in the pipeline's error type.
async fn run_stage(
    chat: &dyn ChatModel,
    stage: &'static str,
    prompt: &str,
) -> Result<String, PipelineError> {
    debug!("running {} stage", stage);

    let text = chat
        .complete("", prompt)
        .await
        .map_err(|source| PipelineError::Stage { stage, source })?;

    if text.trim().is_empty() {
        return Err(PipelineError::EmptyResponse { stage });
    }
    Ok(text)
}
