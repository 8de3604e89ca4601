//! Analysis verdict types
//!
//! A verdict is constructed fresh per analyzed message by either the
//! heuristic scorer or the remote classifier, never mutated afterwards,
//! and never persisted.

use serde::{Deserialize, Serialize};

/// Upper bound on reported suspicious phrases per verdict
pub const MAX_SUSPICIOUS_PHRASES: usize = 8;

/// Pattern list entry used when no indicators were found
pub const NO_PATTERNS_SENTINEL: &str = "No scam patterns detected";

/// Coarse risk bucket derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Derive the tier from a 0-100 risk score via the fixed thresholds
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => Self::Low,
            31..=70 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Get the lowercase wire label for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Structured verdict for a single analyzed message
///
/// Serializes to the wire shape consumed by the web form:
/// `{riskScore, riskLevel, explanation, patterns, suspiciousPhrases}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVerdict {
    /// Risk score in [0, 100], higher is more suspicious
    pub risk_score: u8,

    /// Risk tier bucket
    pub risk_level: RiskLevel,

    /// Human-readable summary of the verdict
    pub explanation: String,

    /// Descriptions of matched indicator categories, in detection order,
    /// or the single sentinel entry when nothing matched
    pub patterns: Vec<String>,

    /// Literal phrases from the input that triggered matches,
    /// first-seen order, deduplicated, capped
    pub suspicious_phrases: Vec<String>,
}

impl AnalysisVerdict {
    /// Deduplicate phrases preserving first-seen order and cap the list
    /// at [`MAX_SUSPICIOUS_PHRASES`]
    pub fn dedup_phrases(phrases: Vec<String>) -> Vec<String> {
        let mut seen = Vec::with_capacity(MAX_SUSPICIOUS_PHRASES);
        for phrase in phrases {
            if seen.len() == MAX_SUSPICIOUS_PHRASES {
                break;
            }
            if !seen.contains(&phrase) {
                seen.push(phrase);
            }
        }
        seen
    }

    /// Replace an empty pattern list with the sentinel entry
    pub fn patterns_or_sentinel(patterns: Vec<String>) -> Vec<String> {
        if patterns.is_empty() {
            vec![NO_PATTERNS_SENTINEL.to_string()]
        } else {
            patterns
        }
    }
}
