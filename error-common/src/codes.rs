// Error codes implementation
// Stable codes reported in API error bodies and log lines

/// Namespaced error code wrapper so call sites read `ErrorCode::INVALID_INPUT`
pub struct ErrorCode;

impl ErrorCode {
    pub const INVALID_INPUT: &'static str = intake::INVALID_INPUT;
    pub const UNSUPPORTED_FILE_TYPE: &'static str = intake::UNSUPPORTED_FILE_TYPE;
    pub const MISSING_AUDIO_FILE: &'static str = intake::MISSING_AUDIO_FILE;
    pub const STORAGE_WRITE_FAILED: &'static str = storage::WRITE_FAILED;
    pub const STORAGE_READ_FAILED: &'static str = storage::READ_FAILED;
    pub const INTERNAL: &'static str = system::INTERNAL;
}

pub mod intake {
    pub const INVALID_INPUT: &str = "INTAKE_1001";
    pub const UNSUPPORTED_FILE_TYPE: &str = "INTAKE_1002";
    pub const MISSING_AUDIO_FILE: &str = "INTAKE_1003";
}

pub mod storage {
    pub const WRITE_FAILED: &str = "STORAGE_3001";
    pub const READ_FAILED: &str = "STORAGE_3002";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYSTEM_9001";
    pub const INTERNAL: &str = "SYSTEM_9002";
    pub const NETWORK: &str = "SYSTEM_9003";
}
