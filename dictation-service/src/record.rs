use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// `consultation_date` layout, local time
pub const CONSULTATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Sentinel the structured-output mapping writes into `patient_id`
pub const AUTO_GENERATED_PATIENT_ID: &str = "AUTO-GENERATED";

/// Confidence reported when the remote workflow produced the record
pub const REMOTE_CONFIDENCE: f64 = 0.85;

/// Local timestamp for a freshly constructed record
pub fn consultation_timestamp() -> String {
    Local::now().format(CONSULTATION_DATE_FORMAT).to_string()
}

/// The canonical ten-field medical record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicalRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "P-2025-001")]
    pub patient_id: String,
    #[schema(example = "2025-06-01 10:30")]
    pub consultation_date: String,
    #[schema(example = "腹痛、下痢症状")]
    pub chief_complaint: String,
    pub present_illness: String,
    pub physical_examination: String,
    #[schema(example = "急性胃腸炎の疑い")]
    pub diagnosis: String,
    pub prescription: String,
    pub guidance: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "1週間後")]
    pub next_appointment: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which path produced a [`ProcessingResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Mapped from the remote workflow's response
    Remote,
    /// Remote service not configured; mock consultation returned
    CredentialsMissing,
    /// Remote service attempted and failed; manual-entry template returned
    RemoteError,
}

/// A medical record plus the pipeline's reported confidence and timing.
///
/// `confidence_score` is a fixed constant per [`RecordOrigin`], not a measured
/// signal.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub medical_record: MedicalRecord,
    pub confidence_score: f64,
    pub processing_time: f64,
    #[serde(skip)]
    pub origin: RecordOrigin,
}

impl ProcessingResult {
    pub fn remote(medical_record: MedicalRecord, processing_time: f64) -> Self {
        Self {
            medical_record,
            confidence_score: REMOTE_CONFIDENCE,
            processing_time,
            origin: RecordOrigin::Remote,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin != RecordOrigin::Remote
    }
}

/// Patient metadata captured alongside the recording. Free text, never
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientData {
    pub name: Option<String>,
    pub id: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

impl PatientData {
    /// Build from raw form values, treating blank strings as absent
    pub fn from_form(
        name: Option<String>,
        id: Option<String>,
        age: Option<String>,
        gender: Option<String>,
    ) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            name: present(name),
            id: present(id),
            age: present(age),
            gender: present(gender),
        }
    }
}

/// A saved medical record with its store-assigned id and save timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredRecord {
    #[schema(example = 1)]
    pub id: u64,
    #[serde(flatten)]
    pub record: MedicalRecord,
    #[schema(example = "2025-06-01T10:35:12.123456")]
    pub created_at: String,
}

impl StoredRecord {
    pub fn new(id: u64, record: MedicalRecord) -> Self {
        Self {
            id,
            record,
            created_at: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn consultation_timestamp_has_minute_precision() {
        let stamp = consultation_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, CONSULTATION_DATE_FORMAT).is_ok());
        assert_eq!(stamp.len(), 16);
    }

    #[test]
    fn optional_fields_deserialize_missing_or_null_as_empty() {
        let record: MedicalRecord = serde_json::from_value(json!({
            "patient_id": null,
            "consultation_date": "2025-06-01 10:30",
            "chief_complaint": "腹痛",
            "present_illness": "3日前から",
            "physical_examination": "圧痛あり",
            "diagnosis": "胃炎",
            "prescription": "整腸剤",
            "guidance": "水分補給"
        }))
        .unwrap();

        assert_eq!(record.patient_id, "");
        assert_eq!(record.next_appointment, "");
        assert_eq!(record.notes, "");
    }

    #[test]
    fn required_fields_are_enforced() {
        let result = serde_json::from_value::<MedicalRecord>(json!({
            "consultation_date": "2025-06-01 10:30"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn stored_record_serializes_flat() {
        let record = MedicalRecord {
            patient_id: "P001".into(),
            consultation_date: "2025-06-01 10:30".into(),
            chief_complaint: "a".into(),
            present_illness: "b".into(),
            physical_examination: "c".into(),
            diagnosis: "d".into(),
            prescription: "e".into(),
            guidance: "f".into(),
            next_appointment: "g".into(),
            notes: "h".into(),
        };
        let value = serde_json::to_value(StoredRecord::new(3, record)).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["patient_id"], "P001");
        assert!(value["created_at"].as_str().unwrap().contains('T'));
        assert!(value.get("record").is_none());
    }

    #[test]
    fn blank_form_values_are_absent() {
        let patient = PatientData::from_form(Some(" ".into()), None, Some("45".into()), Some(String::new()));
        assert_eq!(patient.name, None);
        assert_eq!(patient.age.as_deref(), Some("45"));
        assert_eq!(patient.gender, None);
    }
}
