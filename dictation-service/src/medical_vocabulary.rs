//! Domain vocabulary for the internal medicine / gastroenterology clinic.
//!
//! The remote workflow gets these terms as spelling hints so the transcript
//! uses the clinic's standard Japanese terminology.

/// A group of domain terms shown to the remote workflow together
#[derive(Debug, Clone, Copy)]
pub struct TermGroup {
    pub label: &'static str,
    pub terms: &'static [&'static str],
}

/// Standard clinic vocabulary
pub struct MedicalVocabulary;

impl MedicalVocabulary {
    pub fn term_groups() -> &'static [TermGroup] {
        &[
            TermGroup {
                label: "消化器内科",
                terms: &["胃炎", "胃潰瘍", "逆流性食道炎", "過敏性腸症候群", "炎症性腸疾患"],
            },
            TermGroup {
                label: "内科一般",
                terms: &["高血圧", "糖尿病", "脂質異常症", "甲状腺疾患"],
            },
            TermGroup {
                label: "検査",
                terms: &["胃カメラ", "大腸カメラ", "ピロリ菌検査", "血液検査"],
            },
        ]
    }

    /// Render the hint list as prompt lines, one group per line
    pub fn prompt_hints() -> String {
        Self::term_groups()
            .iter()
            .map(|group| format!("- {}：{}など", group.label, group.terms.join("、")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_render_one_line_per_group() {
        let hints = MedicalVocabulary::prompt_hints();
        assert_eq!(hints.lines().count(), MedicalVocabulary::term_groups().len());
        assert!(hints.starts_with("- 消化器内科：胃炎、胃潰瘍"));
        assert!(hints.contains("ピロリ菌検査"));
    }
}
