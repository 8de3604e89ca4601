//! ScamCheck Core
//!
//! Core types and utilities shared across ScamCheck components.
//!
//! This crate provides:
//! - The analysis verdict types returned by every classification path
//! - Error types and result handling
//! - Risk tier derivation from numeric scores

pub mod error;
pub mod verdict;

pub use error::{Error, Result};
pub use verdict::{AnalysisVerdict, RiskLevel, MAX_SUSPICIOUS_PHRASES, NO_PATTERNS_SENTINEL};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::verdict::{AnalysisVerdict, RiskLevel};
}
