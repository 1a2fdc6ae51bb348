//! Maps a workflow run response onto the ten-field [`MedicalRecord`].
//!
//! The workflow is not guaranteed to return the SOAP-shaped
//! `data.outputs.structured_output` object, so anything else is kept as
//! opaque text for the clinician to review.

use serde_json::{Map, Value};

use crate::record::{consultation_timestamp, MedicalRecord, AUTO_GENERATED_PATIENT_ID};

/// Characters of opaque output kept in the record
pub const OPAQUE_EXCERPT_CHARS: usize = 200;

const STRUCTURED_OUTPUT_POINTER: &str = "/data/outputs/structured_output";

/// Normalise a parsed run response body.
pub fn normalize(body: &Value) -> MedicalRecord {
    match body.pointer(STRUCTURED_OUTPUT_POINTER) {
        Some(Value::Object(structured)) => from_structured_output(structured),
        _ => match body {
            Value::String(text) => from_opaque_text(text),
            other => from_opaque_text(&other.to_string()),
        },
    }
}

/// SOAP mapping. `patient_id` is always the auto-generated sentinel; the
/// caller's id is not carried through this path.
pub fn from_structured_output(structured: &Map<String, Value>) -> MedicalRecord {
    let field = |key: &str, placeholder: &str| {
        soap_text(structured, key).unwrap_or_else(|| placeholder.to_string())
    };

    MedicalRecord {
        patient_id: AUTO_GENERATED_PATIENT_ID.to_string(),
        consultation_date: consultation_timestamp(),
        chief_complaint: field("subjective", "主訴を確認してください"),
        present_illness: field("subjective", "現病歴を確認してください"),
        physical_examination: field("objective", "身体所見を確認してください"),
        diagnosis: field("assessment", "診断を確認してください"),
        prescription: field("plan", "処方内容を確認してください"),
        guidance: field("plan", "指導内容を確認してください"),
        next_appointment: "次回予約を確認してください".to_string(),
        notes: "Dify AI処理完了 - 構造化データから生成".to_string(),
    }
}

/// Record for a response without structured output
pub fn from_opaque_text(text: &str) -> MedicalRecord {
    let excerpt: String = text.chars().take(OPAQUE_EXCERPT_CHARS).collect();
    let present_illness = if excerpt.is_empty() {
        "音声処理結果を確認してください".to_string()
    } else {
        excerpt.clone()
    };

    MedicalRecord {
        patient_id: AUTO_GENERATED_PATIENT_ID.to_string(),
        consultation_date: consultation_timestamp(),
        chief_complaint: "音声から抽出された主訴".to_string(),
        present_illness,
        physical_examination: "診察所見を確認してください".to_string(),
        diagnosis: "診断を確認してください".to_string(),
        prescription: "処方内容を確認してください".to_string(),
        guidance: "指導内容を確認してください".to_string(),
        next_appointment: "次回予約を確認してください".to_string(),
        notes: format!("Dify処理結果: {excerpt}"),
    }
}

fn soap_text(structured: &Map<String, Value>, key: &str) -> Option<String> {
    match structured.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
