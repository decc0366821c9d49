use chrono::{NaiveDateTime, Utc};

use super::{CaptionVariant, Tone};

/// Timestamp rendering used in every audit log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time in the audit log format.
pub fn now_stamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an audit timestamp back into a sortable value.
pub fn parse_stamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// An audit log row: the column layout plus the field codec.
///
/// `to_fields` and `from_fields` must round-trip exactly; the log itself
/// never interprets field contents beyond the user and timestamp accessors.
pub trait Record: Send + Sync + Sized {
    /// Column headers, written once when the file is created.
    const HEADERS: &'static [&'static str];

    fn to_fields(&self) -> Vec<String>;

    /// Rebuild a record from a parsed row. `None` when the column count
    /// does not match; callers skip such rows.
    fn from_fields(fields: &[String]) -> Option<Self>;

    fn user(&self) -> &str;

    fn timestamp(&self) -> &str;
}

/// Content studio interaction: one generated image plus caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub timestamp: String,
    pub user: String,
    pub prompt: String,
    pub variant: String,
    pub image_url: String,
}

impl ContentRecord {
    pub fn new(user: &str, prompt: &str, variant: CaptionVariant, image_url: &str) -> Self {
        Self {
            timestamp: now_stamp(),
            user: user.to_string(),
            prompt: prompt.to_string(),
            variant: variant.label().to_string(),
            image_url: image_url.to_string(),
        }
    }
}

impl Record for ContentRecord {
    const HEADERS: &'static [&'static str] = &["timestamp", "user", "prompt", "variant", "image_url"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.user.clone(),
            self.prompt.clone(),
            self.variant.clone(),
            self.image_url.clone(),
        ]
    }

    fn from_fields(fields: &[String]) -> Option<Self> {
        let [timestamp, user, prompt, variant, image_url] = fields else {
            return None;
        };
        Some(Self {
            timestamp: timestamp.clone(),
            user: user.clone(),
            prompt: prompt.clone(),
            variant: variant.clone(),
            image_url: image_url.clone(),
        })
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Stylist interaction: a prompt and its validation result text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylistRecord {
    pub timestamp: String,
    pub user: String,
    pub prompt: String,
    pub result: String,
}

impl StylistRecord {
    pub fn new(user: &str, prompt: &str, result: &str) -> Self {
        Self {
            timestamp: now_stamp(),
            user: user.to_string(),
            prompt: prompt.to_string(),
            result: result.to_string(),
        }
    }
}

impl Record for StylistRecord {
    const HEADERS: &'static [&'static str] = &["timestamp", "user", "prompt", "result"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.user.clone(),
            self.prompt.clone(),
            self.result.clone(),
        ]
    }

    fn from_fields(fields: &[String]) -> Option<Self> {
        let [timestamp, user, prompt, result] = fields else {
            return None;
        };
        Some(Self {
            timestamp: timestamp.clone(),
            user: user.clone(),
            prompt: prompt.clone(),
            result: result.clone(),
        })
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Review desk interaction: original review, final rewrite, critique text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRecord {
    pub timestamp: String,
    pub user: String,
    pub tone: String,
    pub original: String,
    pub rewritten: String,
    pub evaluation: String,
}

impl RewriteRecord {
    pub fn new(user: &str, tone: Tone, original: &str, rewritten: &str, evaluation: &str) -> Self {
        Self {
            timestamp: now_stamp(),
            user: user.to_string(),
            tone: tone.label().to_string(),
            original: original.to_string(),
            rewritten: rewritten.to_string(),
            evaluation: evaluation.to_string(),
        }
    }
}

impl Record for RewriteRecord {
    const HEADERS: &'static [&'static str] =
        &["timestamp", "user", "tone", "original", "rewritten", "evaluation"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.user.clone(),
            self.tone.clone(),
            self.original.clone(),
            self.rewritten.clone(),
            self.evaluation.clone(),
        ]
    }

    fn from_fields(fields: &[String]) -> Option<Self> {
        let [timestamp, user, tone, original, rewritten, evaluation] = fields else {
            return None;
        };
        Some(Self {
            timestamp: timestamp.clone(),
            user: user.clone(),
            tone: tone.clone(),
            original: original.clone(),
            rewritten: rewritten.clone(),
            evaluation: evaluation.clone(),
        })
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_record_round_trip() {
        let record = ContentRecord::new(
            "alice",
            "Rustic Fall Kitchen",
            CaptionVariant::WarmCozy,
            "https://img.example/1.png",
        );

        let fields = record.to_fields();
        assert_eq!(fields.len(), ContentRecord::HEADERS.len());

        let back = ContentRecord::from_fields(&fields).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_rewrite_record_round_trip() {
        let record = RewriteRecord::new(
            "Bob",
            Tone::LuxuryPremium,
            "it broke, twice",
            "A refined take",
            "Clarity: 4/5. Good.",
        );

        let back = RewriteRecord::from_fields(&record.to_fields()).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.tone, "Luxury & Premium");
    }

    #[test]
    fn test_from_fields_rejects_wrong_arity() {
        let fields = vec!["only".to_string(), "two".to_string()];
        assert!(StylistRecord::from_fields(&fields).is_none());
    }

    #[test]
    fn test_stamp_round_trip() {
        let stamp = now_stamp();
        assert!(parse_stamp(&stamp).is_some());
        assert!(parse_stamp("yesterday-ish").is_none());
    }
}
