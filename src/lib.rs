//! # transcript-locator
//!
//! Finds case-insensitive, whole-word occurrences of a word in quarterly
//! call transcripts and renders them with surrounding context for review.
//!
//! ```
//! use transcript_locator::{TranscriptCollection, report};
//!
//! let collection = TranscriptCollection::from_json(
//!     r#"{"transcripts":[{"quarter":"Q3 2025","transcript":"A holiday sale."}]}"#,
//! )?;
//! let found = report::verify(&collection, "Q3 2025", "holiday", 100)?;
//! assert_eq!(found.entries.len(), 1);
//! # Ok::<(), transcript_locator::LocatorError>(())
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod excerpt;
pub mod report;
pub mod search;
pub mod transcript;

pub use config::LocatorConfig;
pub use context::ContextWindow;
pub use error::{LocatorError, Result};
pub use report::{DebugReport, ExcerptReport, FrequencyReport, Trend, VerifyReport};
pub use search::{Occurrence, VariantCounts, WordPattern};
pub use transcript::{Transcript, TranscriptCollection};
