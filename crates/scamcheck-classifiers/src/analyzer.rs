//! Analysis orchestration
//!
//! Entry point for callers: one message in, one verdict out. When a remote
//! classifier is configured it gets exactly one attempt per request, with
//! silent fallback to the local heuristic path on any failure. The
//! orchestrator never surfaces an error to its caller.

use crate::explanation;
use crate::heuristic::HeuristicScorer;
use crate::remote::{GeminiClassifier, RemoteClassifier, RemoteConfig};
use scamcheck_core::{AnalysisVerdict, Result, RiskLevel};
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrates verdict production for a single message
pub struct MessageAnalyzer {
    scorer: HeuristicScorer,
    remote: Option<Arc<dyn RemoteClassifier>>,
}

impl MessageAnalyzer {
    /// Create a heuristic-only analyzer
    pub fn new() -> Result<Self> {
        Ok(Self {
            scorer: HeuristicScorer::new()?,
            remote: None,
        })
    }

    /// Create an analyzer that tries the given remote classifier first
    pub fn with_remote(remote: Arc<dyn RemoteClassifier>) -> Result<Self> {
        Ok(Self {
            scorer: HeuristicScorer::new()?,
            remote: Some(remote),
        })
    }

    /// Create an analyzer from the process environment: remote-first when
    /// a credential is configured, heuristic-only otherwise
    pub fn from_env() -> Result<Self> {
        match RemoteConfig::from_env() {
            Some(config) => {
                debug!(model = %config.model, "remote classifier configured");
                Self::with_remote(Arc::new(GeminiClassifier::new(config)?))
            }
            None => {
                debug!("no remote credential configured, running heuristic-only");
                Self::new()
            }
        }
    }

    /// Whether a remote classifier is configured
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Analyze a message and produce a verdict.
    ///
    /// Infallible: any remote failure degrades to the heuristic path. The
    /// caller guarantees the message is non-empty and within the accepted
    /// length bound.
    pub async fn analyze(&self, message: &str) -> AnalysisVerdict {
        if let Some(remote) = &self.remote {
            match remote.classify(message).await {
                Ok(verdict) => {
                    debug!(
                        classifier = remote.name(),
                        score = verdict.risk_score,
                        "remote verdict accepted"
                    );
                    return verdict;
                }
                Err(err) => {
                    warn!(
                        classifier = remote.name(),
                        error = %err,
                        "remote classification failed, falling back to heuristics"
                    );
                }
            }
        }

        self.heuristic_verdict(message)
    }

    /// Run the local heuristic path only
    pub fn heuristic_verdict(&self, message: &str) -> AnalysisVerdict {
        let breakdown = self.scorer.score(message);
        let risk_level = RiskLevel::from_score(breakdown.score);
        let explanation = explanation::synthesize(breakdown.score, risk_level, &breakdown.patterns);

        AnalysisVerdict {
            risk_score: breakdown.score,
            risk_level,
            explanation,
            patterns: AnalysisVerdict::patterns_or_sentinel(breakdown.patterns),
            suspicious_phrases: breakdown.suspicious_phrases,
        }
    }
}
