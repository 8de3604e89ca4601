//! Explanation synthesis
//!
//! Pure string templating over the score, tier, and matched pattern
//! descriptions. No model calls; deterministic for a given input.

use scamcheck_core::RiskLevel;

/// Fixed explanation used when no indicators were found at all
pub const NO_INDICATORS_EXPLANATION: &str = "No scam indicators were detected in this message. \
     It appears legitimate, but always stay cautious with unexpected messages asking you to act.";

/// Build the human-readable explanation for a verdict.
///
/// `patterns` holds the matched category descriptions in detection order,
/// without the no-patterns sentinel.
pub fn synthesize(score: u8, level: RiskLevel, patterns: &[String]) -> String {
    if score == 0 {
        return NO_INDICATORS_EXPLANATION.to_string();
    }

    match level {
        RiskLevel::Low => {
            if patterns.is_empty() {
                "This message shows only minimal risk indicators. Still, verify the sender's \
                 identity before taking any action."
                    .to_string()
            } else {
                "This message shows only minimal risk indicators, and the detected patterns can \
                 also appear in legitimate messages. Still, verify the sender's identity before \
                 taking any action."
                    .to_string()
            }
        }
        RiskLevel::Medium => {
            let headline = patterns
                .first()
                .map(|p| p.to_lowercase())
                .unwrap_or_else(|| "several warning signs".to_string());
            format!(
                "This message shows warning signs of a scam, most notably {headline}. Be careful \
                 and verify any claims through official channels before responding."
            )
        }
        RiskLevel::High => {
            let concerns = if patterns.len() >= 2 {
                format!(
                    "{} and {}",
                    patterns[0].to_lowercase(),
                    patterns[1].to_lowercase()
                )
            } else if let Some(first) = patterns.first() {
                first.to_lowercase()
            } else {
                "multiple scam indicators".to_string()
            };
            format!(
                "⚠️ This message is very likely a scam, showing {concerns}. Do not click any \
                 links, do not send money or share personal information, and contact the \
                 organization directly through official channels if in doubt."
            )
        }
    }
}
