//! Locally synthesised records for when the remote workflow is not used.
//!
//! The two variants are deliberately distinguishable: the mock consultation
//! carries the success confidence, the manual-entry template carries `0.0`.

use crate::record::{
    consultation_timestamp, MedicalRecord, PatientData, ProcessingResult, RecordOrigin,
    AUTO_GENERATED_PATIENT_ID, REMOTE_CONFIDENCE,
};

/// Patient id used by the mock consultation when none was supplied
pub const MOCK_PATIENT_ID: &str = "P001";

/// Confidence of the manual-entry template
pub const REMOTE_ERROR_CONFIDENCE: f64 = 0.0;

/// Remote service not configured: a canned gastroenteritis consultation.
pub fn credentials_missing(patient: &PatientData, processing_time: f64) -> ProcessingResult {
    let record = MedicalRecord {
        patient_id: patient_id_or(patient, MOCK_PATIENT_ID),
        consultation_date: consultation_timestamp(),
        chief_complaint: "腹痛、下痢症状".to_string(),
        present_illness: "3日前から腹痛と下痢が続いている。食欲不振もあり。".to_string(),
        physical_examination: "腹部：軽度圧痛あり、腸音亢進".to_string(),
        diagnosis: "急性胃腸炎の疑い".to_string(),
        prescription: "整腸剤、止痢剤を処方".to_string(),
        guidance: "水分補給を心がけ、消化の良い食事を摂取してください".to_string(),
        next_appointment: "1週間後".to_string(),
        notes: "症状が改善しない場合は早めに受診（モックデータ）".to_string(),
    };

    ProcessingResult {
        medical_record: record,
        confidence_score: REMOTE_CONFIDENCE,
        processing_time,
        origin: RecordOrigin::CredentialsMissing,
    }
}

/// Remote service attempted and failed: every field asks for manual entry.
pub fn remote_error(patient: &PatientData, processing_time: f64) -> ProcessingResult {
    let record = MedicalRecord {
        patient_id: patient_id_or(patient, AUTO_GENERATED_PATIENT_ID),
        consultation_date: consultation_timestamp(),
        chief_complaint: "システム処理中のため、手動で入力してください".to_string(),
        present_illness: "詳細な症状経過を記録してください".to_string(),
        physical_examination: "身体所見を記録してください".to_string(),
        diagnosis: "診断を記録してください".to_string(),
        prescription: "処方内容を記録してください".to_string(),
        guidance: "患者指導内容を記録してください".to_string(),
        next_appointment: "次回予約を設定してください".to_string(),
        notes: "Dify API接続エラーのため、フォールバック応答を使用".to_string(),
    };

    ProcessingResult {
        medical_record: record,
        confidence_score: REMOTE_ERROR_CONFIDENCE,
        processing_time,
        origin: RecordOrigin::RemoteError,
    }
}

fn patient_id_or(patient: &PatientData, default: &str) -> String {
    patient.id.clone().unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_missing_uses_mock_consultation() {
        let result = credentials_missing(&PatientData::default(), 0.0);

        assert_eq!(result.confidence_score, 0.85);
        assert_eq!(result.origin, RecordOrigin::CredentialsMissing);
        assert_eq!(result.medical_record.patient_id, "P001");
        assert!(result.medical_record.notes.ends_with("（モックデータ）"));
        assert!(result.is_fallback());
    }

    #[test]
    fn remote_error_uses_manual_entry_template() {
        let result = remote_error(&PatientData::default(), 1.5);

        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.origin, RecordOrigin::RemoteError);
        assert_eq!(result.processing_time, 1.5);
        assert_eq!(result.medical_record.patient_id, "AUTO-GENERATED");
        assert_eq!(result.medical_record.notes, "Dify API接続エラーのため、フォールバック応答を使用");
    }

    #[test]
    fn variants_are_distinguishable() {
        let patient = PatientData::default();
        let mock = credentials_missing(&patient, 0.0).medical_record;
        let manual = remote_error(&patient, 0.0).medical_record;

        assert_ne!(mock.chief_complaint, manual.chief_complaint);
        assert_ne!(mock.diagnosis, manual.diagnosis);
        assert_ne!(mock.notes, manual.notes);
    }

    #[test]
    fn supplied_patient_id_is_kept() {
        let patient = PatientData {
            id: Some("P-2025-042".into()),
            ..Default::default()
        };
        assert_eq!(credentials_missing(&patient, 0.0).medical_record.patient_id, "P-2025-042");
        assert_eq!(remote_error(&patient, 0.0).medical_record.patient_id, "P-2025-042");
    }
}
