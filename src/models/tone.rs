use std::fmt;

/// Tone preferences offered by the review desk.
///
/// The label strings are the canonical form: they appear in the form select,
/// in the audit log, and as keys' values in the tone-memory file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    WarmFriendly,
    LuxuryPremium,
    HelpfulTechnical,
}

impl Tone {
    /// All tones, in display order.
    pub const ALL: [Tone; 3] = [
        Tone::WarmFriendly,
        Tone::LuxuryPremium,
        Tone::HelpfulTechnical,
    ];

    /// Human-facing label, also used as the persisted value.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::WarmFriendly => "Warm & Friendly",
            Tone::LuxuryPremium => "Luxury & Premium",
            Tone::HelpfulTechnical => "Helpful & Technical",
        }
    }

    /// Parse a persisted or submitted label back into a tone.
    pub fn from_label(label: &str) -> Option<Tone> {
        Tone::ALL.iter().copied().find(|t| t.label() == label)
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::WarmFriendly
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A/B caption tone variant for the content studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionVariant {
    /// Variant A: warm, cozy, emotional copy.
    WarmCozy,
    /// Variant B: sleek, modern luxury copy.
    ModernSleek,
}

impl CaptionVariant {
    pub const ALL: [CaptionVariant; 2] = [CaptionVariant::WarmCozy, CaptionVariant::ModernSleek];

    /// Short form value posted by the radio input.
    pub fn code(&self) -> &'static str {
        match self {
            CaptionVariant::WarmCozy => "A",
            CaptionVariant::ModernSleek => "B",
        }
    }

    /// Label shown next to the radio input and written to the audit log.
    pub fn label(&self) -> &'static str {
        match self {
            CaptionVariant::WarmCozy => "A - Warm & Cozy (emotional)",
            CaptionVariant::ModernSleek => "B - Modern & Sleek (luxury tone)",
        }
    }

    /// Parse a submitted form value. Accepts the short code or the full label.
    pub fn from_code(value: &str) -> Option<CaptionVariant> {
        match value.trim() {
            v if v.starts_with('A') => Some(CaptionVariant::WarmCozy),
            v if v.starts_with('B') => Some(CaptionVariant::ModernSleek),
            _ => None,
        }
    }
}

impl fmt::Display for CaptionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_label_round_trip() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_label(tone.label()), Some(tone));
        }
        assert_eq!(Tone::from_label("Sarcastic"), None);
    }

    #[test]
    fn test_default_tone() {
        assert_eq!(Tone::default(), Tone::WarmFriendly);
    }

    #[test]
    fn test_variant_from_code() {
        assert_eq!(CaptionVariant::from_code("A"), Some(CaptionVariant::WarmCozy));
        assert_eq!(
            CaptionVariant::from_code("B - Modern & Sleek (luxury tone)"),
            Some(CaptionVariant::ModernSleek)
        );
        assert_eq!(CaptionVariant::from_code("C"), None);
    }
}
