use super::PipelineError;

/// Words that fail the style QA scan (themes outside the catalog's range).
const STYLE_BANNED: &[&str] = &[
    "violence", "erotic", "gothic", "dark", "sad", "depressing", "death", "horror", "scary",
    "fear", "terror", "fright", "anxiety", "anxious", "panic", "stress",
];

/// Words that fail the compliance scan (off-brand pricing and knockoff talk).
const COMPLIANCE_BANNED: &[&str] = &[
    "cheap",
    "replica",
    "knockoff",
    "fake",
    "counterfeit",
    "imitation",
    "substandard",
    "inferior",
    "low-quality",
    "low-cost",
    "inexpensive",
    "budget",
    "discount",
    "sale",
    "clearance",
];

/// Outcome of one banned-word scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Which check this was, e.g. "Style QA".
    pub name: &'static str,
    /// Banned words found in the prompt, in list order.
    pub found: Vec<String>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.found.is_empty()
    }

    /// One display line: "Style QA passed" or the failure with its findings.
    pub fn summary(&self) -> String {
        if self.passed() {
            format!("{} passed", self.name)
        } else {
            format!("{} failed (found: {})", self.name, self.found.join(", "))
        }
    }
}

/// Full validation report for one prompt: both checks plus the publish gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub prompt: String,
    pub style: CheckResult,
    pub compliance: CheckResult,
}

impl ValidationReport {
    /// Publishing goes ahead only when both checks pass.
    pub fn publishable(&self) -> bool {
        self.style.passed() && self.compliance.passed()
    }

    /// The publish-gate display line.
    pub fn publish_line(&self) -> String {
        if self.publishable() {
            format!("Content published: '{}'", self.prompt)
        } else {
            "Publishing blocked: validation failed".to_string()
        }
    }

    /// The three result lines joined for display and for the audit row.
    pub fn summary(&self) -> String {
        [
            self.style.summary(),
            self.compliance.summary(),
            self.publish_line(),
        ]
        .join("\n")
    }
}

/// Scan a prompt against a banned-word list, case-insensitively.
fn scan(name: &'static str, prompt: &str, banned: &[&str]) -> CheckResult {
    let lowered = prompt.to_lowercase();
    let found = banned
        .iter()
        .filter(|word| lowered.contains(*word))
        .map(|word| word.to_string())
        .collect();
    CheckResult { name, found }
}

/// Style QA scan: does the theme fit the catalog's range?
pub fn check_style(prompt: &str) -> CheckResult {
    scan("Style QA", prompt, STYLE_BANNED)
}

/// Compliance scan: no off-brand pricing or knockoff language.
pub fn check_compliance(prompt: &str) -> CheckResult {
    scan("Compliance", prompt, COMPLIANCE_BANNED)
}

/// Run both checks and the publish gate over a styling prompt.
///
/// No external calls: this pipeline is entirely string-based.
pub fn validate_prompt(prompt: &str) -> Result<ValidationReport, PipelineError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(PipelineError::EmptyPrompt);
    }

    Ok(ValidationReport {
        prompt: prompt.to_string(),
        style: check_style(prompt),
        compliance: check_compliance(prompt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_prompt_publishes() {
        let report = validate_prompt("Cozy Scandinavian Living Room").unwrap();

        assert!(report.style.passed());
        assert!(report.compliance.passed());
        assert!(report.publishable());
        assert!(report
            .publish_line()
            .contains("Content published: 'Cozy Scandinavian Living Room'"));
    }

    #[test]
    fn test_style_violation_blocks_publishing() {
        let report = validate_prompt("Dark gothic dungeon bedroom").unwrap();

        assert_eq!(report.style.found, vec!["gothic", "dark"]);
        assert!(report.compliance.passed());
        assert!(!report.publishable());
        assert_eq!(report.publish_line(), "Publishing blocked: validation failed");
    }

    #[test]
    fn test_compliance_violation_blocks_publishing() {
        let report = validate_prompt("Cheap replica of a designer kitchen").unwrap();

        assert!(report.style.passed());
        assert_eq!(report.compliance.found, vec!["cheap", "replica"]);
        assert!(!report.publishable());
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let result = check_compliance("A DISCOUNT showroom");
        assert_eq!(result.found, vec!["discount"]);
    }

    #[test]
    fn test_summary_has_three_lines() {
        let report = validate_prompt("Minimalist Zen Spa Bathroom").unwrap();
        let summary = report.summary();

        assert_eq!(summary.lines().count(), 3);
        assert!(summary.contains("Style QA passed"));
        assert!(summary.contains("Compliance passed"));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert!(matches!(
            validate_prompt("  "),
            Err(PipelineError::EmptyPrompt)
        ));
    }
}
