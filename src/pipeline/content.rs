use tracing::debug;

use crate::llm::{
    build_caption_prompt, decorate_image_prompt, ChatModel, ImageModel, CAPTION_SYSTEM_PROMPT,
};
use crate::models::CaptionVariant;

use super::PipelineError;

/// Output of the content generation pipeline.
#[derive(Debug, Clone)]
pub struct ContentOutcome {
    /// Hosted URL of the generated image.
    pub image_url: String,
    /// Product caption in the chosen tone variant.
    pub caption: String,
}

/// Generate a catalog image and an A/B-toned caption for a style theme.
///
/// The image call runs first; a failure there skips the caption call
/// entirely, mirroring the sequential no-partial-output contract of the
/// review pipeline.
pub async fn execute_content(
    chat: &dyn ChatModel,
    image: &dyn ImageModel,
    style: &str,
    variant: CaptionVariant,
) -> Result<ContentOutcome, PipelineError> {
    let style = style.trim();
    if style.is_empty() {
        return Err(PipelineError::EmptyPrompt);
    }

    debug!("running image stage");
    let image_url = image
        .generate_image(&decorate_image_prompt(style))
        .await
        .map_err(|source| PipelineError::Stage {
            stage: "image",
            source,
        })?;
    if image_url.trim().is_empty() {
        return Err(PipelineError::EmptyResponse { stage: "image" });
    }

    debug!("running caption stage");
    let caption = chat
        .complete(CAPTION_SYSTEM_PROMPT, &build_caption_prompt(style, variant))
        .await
        .map_err(|source| PipelineError::Stage {
            stage: "caption",
            source,
        })?;
    if caption.trim().is_empty() {
        return Err(PipelineError::EmptyResponse { stage: "caption" });
    }

    Ok(ContentOutcome { image_url, caption })
}
