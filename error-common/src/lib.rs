//! Common error handling utilities for the Voice Karte services
//!
//! Provides the shared [`KarteError`] enum, a [`Result`] alias and the stable
//! error codes that API responses carry. Crates with a narrower concern
//! (the dictation pipeline, the HTTP layer) define their own error enums and
//! convert into these types at their boundaries.
//!
//! # Example
//!
//! ```rust
//! use error_common::{KarteError, ErrorCode};
//!
//! fn next_record_id(len: usize) -> error_common::Result<u64> {
//!     u64::try_from(len)
//!         .map(|len| len + 1)
//!         .map_err(|e| KarteError::StorageError(format!("record id overflow: {}", e)))
//! }
//!
//! assert_eq!(next_record_id(0).ok(), Some(1));
//!
//! let err = KarteError::StorageError("store unavailable".into());
//! assert_eq!(err.code(), ErrorCode::STORAGE_WRITE_FAILED);
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
