use crate::models::{CaptionVariant, Tone};

/// System prompt for caption generation in the content studio
pub const CAPTION_SYSTEM_PROMPT: &str = "You're a product copywriter for interior designs.";

/// Stage 1 of the review pipeline: synthesize the tone instruction.
/// Pure string template, no external call.
pub fn tone_prompt(tone: Tone) -> String {
    format!(
        "You are a brand-aligned marketing writer. Use a {} tone to rewrite customer reviews. \
         Preserve meaning, increase empathy, and make it polished and brand-fit.",
        tone.label()
    )
}

/// Build the rewrite-stage prompt from the original review and the tone instruction
pub fn build_rewrite_prompt(review: &str, tone_prompt: &str) -> String {
    format!("{tone_prompt}\n\nCustomer Review:\n\"{review}\"\n\nRewritten:")
}

/// Build the critique-stage prompt. The draft is embedded verbatim.
pub fn build_critique_prompt(draft: &str) -> String {
    format!(
        r#"Evaluate the following customer review across four criteria:
- Clarity (1-5)
- Tone Fit to premium brand (1-5)
- Empathy (1-5)
- Brand Voice Consistency (1-5)

For each, rate it like: `Clarity: 4/5. Reason here...`

Review:
"""{draft}"""

Return in this format exactly:
Clarity: <score>/5. <short reason>
Tone Fit to premium brand: <score>/5. <short reason>
Empathy: <score>/5. <short reason>
Brand Voice Consistency: <score>/5. <short reason>"#
    )
}

/// Build the edit-stage prompt. Both the draft and the critique text are
/// embedded verbatim.
pub fn build_edit_prompt(draft: &str, critique: &str) -> String {
    format!(
        "You are an editor improving customer reviews.\n\n\
         Given the following critique:\n{critique}\n\n\
         Revise the review below to address all feedback:\n\n\
         \"{draft}\"\n\n\
         Improved Review:"
    )
}

/// Build the caption prompt for a style theme under an A/B tone variant
pub fn build_caption_prompt(style: &str, variant: CaptionVariant) -> String {
    match variant {
        CaptionVariant::WarmCozy => format!(
            "Write a warm, cozy product description for a scene in {style} style. \
             Keep the house brand voice."
        ),
        CaptionVariant::ModernSleek => format!(
            "Write a sleek, modern luxury product description for a scene in {style} style. \
             Keep the house brand voice."
        ),
    }
}

/// Decorate a style theme into the full image-generation prompt
pub fn decorate_image_prompt(style: &str) -> String {
    format!(
        "{style}, styled for a premium home catalog, high-quality lighting, \
         photo-realistic, elegant composition, no people, no words, no logos, no text overlay"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_prompt_names_the_tone() {
        let prompt = tone_prompt(Tone::LuxuryPremium);
        assert!(prompt.contains("Luxury & Premium"));
    }

    #[test]
    fn test_rewrite_prompt_embeds_review_verbatim() {
        let prompt = build_rewrite_prompt("it broke, twice", "TONE");
        assert!(prompt.starts_with("TONE"));
        assert!(prompt.contains("\"it broke, twice\""));
        assert!(prompt.ends_with("Rewritten:"));
    }

    #[test]
    fn test_critique_prompt_lists_all_criteria() {
        let prompt = build_critique_prompt("the draft");
        for label in [
            "Clarity",
            "Tone Fit to premium brand",
            "Empathy",
            "Brand Voice Consistency",
        ] {
            assert!(prompt.contains(label), "missing criterion {label}");
        }
        assert!(prompt.contains(r#""""the draft""""#));
    }

    #[test]
    fn test_edit_prompt_embeds_both_inputs() {
        let prompt = build_edit_prompt("the draft", "Clarity: 2/5. Muddled.");
        assert!(prompt.contains("\"the draft\""));
        assert!(prompt.contains("Clarity: 2/5. Muddled."));
    }

    #[test]
    fn test_image_prompt_keeps_catalog_constraints() {
        let prompt = decorate_image_prompt("Rustic Fall Kitchen");
        assert!(prompt.starts_with("Rustic Fall Kitchen,"));
        assert!(prompt.contains("no text overlay"));
    }
}
