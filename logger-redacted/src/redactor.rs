use regex::Regex;
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use base64::{Engine as _, engine::general_purpose};

lazy_static! {
    #[allow(clippy::expect_used)]
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern");
    // Japanese landline/mobile numbers and North American numbers
    #[allow(clippy::expect_used)]
    static ref PHONE_REGEX: Regex = Regex::new(r"\b0\d{1,4}-\d{1,4}-\d{4}\b|\(?\b[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b").expect("phone pattern");
    // Clinic patient identifiers such as P001 or P-2025-001
    #[allow(clippy::expect_used)]
    static ref PATIENT_ID_REGEX: Regex = Regex::new(r"\bP-?\d{3,}(?:-\d+)*\b").expect("patient id pattern");
    #[allow(clippy::expect_used)]
    static ref BEARER_REGEX: Regex = Regex::new(r"Bearer\s+[A-Za-z0-9._~+/=-]+").expect("bearer pattern");
}

const MAX_VISIBLE_PROMPT_CHARS: usize = 100;

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_patient_ids: bool,
    pub redact_bearer_tokens: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_patient_ids: true,
            redact_bearer_tokens: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_patient_ids {
            result = self.replace_with(&PATIENT_ID_REGEX, &result, "PATIENT", "P[REDACTED]");
        }

        if self.config.redact_bearer_tokens {
            result = BEARER_REGEX.replace_all(&result, "Bearer [REDACTED]").to_string();
        }

        if self.config.redact_emails {
            result = self.replace_with(&EMAIL_REGEX, &result, "EMAIL", "***@***");
        }

        if self.config.redact_phones {
            result = self.replace_with(&PHONE_REGEX, &result, "PHONE", "***-****-****");
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    /// Mask a value that is known to identify a patient (name, id).
    ///
    /// Absent or blank values come back as `-` so log fields stay aligned.
    pub fn mask_identifier(&self, value: Option<&str>) -> String {
        match value.map(str::trim) {
            None | Some("") => "-".to_string(),
            Some(v) if self.config.hash_for_correlation => format!("ID[{}]", self.hash_value(v)),
            Some(_) => "[REDACTED]".to_string(),
        }
    }

    /// Length-capped, redacted rendering of prompt text for debug logs
    pub fn sanitize_for_logging(&self, prompt: &str) -> String {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return String::from("[EMPTY]");
        }

        let total = trimmed.chars().count();
        let visible = if total > MAX_VISIBLE_PROMPT_CHARS {
            let head: String = trimmed.chars().take(MAX_VISIBLE_PROMPT_CHARS).collect();
            format!("{}... ({} chars total)", head, total)
        } else {
            trimmed.to_string()
        };

        self.redact(&visible)
    }

    fn replace_with(&self, pattern: &Regex, text: &str, label: &str, mask: &str) -> String {
        pattern
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("{}[{}]", label, self.hash_value(caps.get(0).map_or("", |m| m.as_str())))
                } else {
                    mask.to_string()
                }
            })
            .to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        let prefix: Vec<u8> = result.iter().take(6).copied().collect();
        general_purpose::STANDARD_NO_PAD.encode(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let redacted = masking_redactor().redact("Contact tanaka@example.jp about results");
        assert!(redacted.contains("***@***"));
        assert!(!redacted.contains("tanaka@example.jp"));
    }

    #[test]
    fn test_japanese_phone_redaction() {
        let redacted = masking_redactor().redact("連絡先 090-1234-5678");
        assert!(redacted.contains("***-****-****"));
        assert!(!redacted.contains("1234"));
    }

    #[test]
    fn test_patient_id_redaction() {
        let redactor = masking_redactor();
        assert_eq!(redactor.redact("patient P-2025-001 saved"), "patient P[REDACTED] saved");
        assert_eq!(redactor.redact("fallback for P001"), "fallback for P[REDACTED]");
    }

    #[test]
    fn test_bearer_token_redaction() {
        let redacted = PiiRedactor::default().redact("Authorization: Bearer app-abc123.def");
        assert_eq!(redacted, "Authorization: Bearer [REDACTED]");
    }

    #[test]
    fn test_hashed_identifiers_are_stable() {
        let redactor = PiiRedactor::default();
        let first = redactor.mask_identifier(Some("田中太郎"));
        let second = redactor.mask_identifier(Some("田中太郎"));
        assert_eq!(first, second);
        assert!(first.starts_with("ID["));
        assert!(!first.contains("田中"));
        assert_eq!(redactor.mask_identifier(None), "-");
        assert_eq!(redactor.mask_identifier(Some("  ")), "-");
    }

    #[test]
    fn test_prompt_sanitizing_counts_characters() {
        let prompt = "診".repeat(150);
        let sanitized = PiiRedactor::default().sanitize_for_logging(&prompt);
        assert!(sanitized.ends_with("... (150 chars total)"));
        assert_eq!(PiiRedactor::default().sanitize_for_logging("   "), "[EMPTY]");
    }
}
