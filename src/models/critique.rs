/// Parsed view of a critique returned by the critique stage.
///
/// The model is asked for one line per criterion in the form
/// `Label: <score>/5. <reason>`, but nothing enforces that grammar, so the
/// parser is total: it never fails, lifts a score out of each line where one
/// is present, and keeps everything else as a plain remark. The raw text is
/// preserved untouched for the audit log and for the edit stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiqueReport {
    /// The critique exactly as the model returned it.
    pub raw: String,
    /// Best-effort line-by-line breakdown.
    pub lines: Vec<CritiqueLine>,
}

/// One line of a critique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiqueLine {
    /// Text before the first colon, when the line had one.
    pub label: Option<String>,
    /// Score out of 5, when the value led with `<n>/5`.
    pub score: Option<u8>,
    /// Whatever remained of the line.
    pub remark: String,
}

impl CritiqueReport {
    /// Split a critique into lines on the `Label: score/5. reason` convention.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_line)
            .collect();

        Self {
            raw: text.to_string(),
            lines,
        }
    }

    /// Lines that carried a numeric score.
    pub fn scored(&self) -> impl Iterator<Item = &CritiqueLine> {
        self.lines.iter().filter(|l| l.score.is_some())
    }
}

fn parse_line(line: &str) -> CritiqueLine {
    let Some((label, value)) = line.split_once(':') else {
        return CritiqueLine {
            label: None,
            score: None,
            remark: line.trim().to_string(),
        };
    };

    let (score, remark) = split_score(value);
    CritiqueLine {
        label: Some(label.trim().to_string()),
        score,
        remark,
    }
}

/// Lift a leading `<n>/5` out of a critique value, if present and in range.
fn split_score(value: &str) -> (Option<u8>, String) {
    let value = value.trim();
    if let Some((head, tail)) = value.split_once("/5") {
        if let Ok(score) = head.trim().parse::<u8>() {
            if score <= 5 {
                let remark = tail.trim_start_matches(['.', ' ']).trim().to_string();
                return (Some(score), remark);
            }
        }
    }
    (None, value.to_string())
}
