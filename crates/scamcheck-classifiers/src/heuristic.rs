//! Heuristic message scorer
//!
//! Deterministic keyword and formatting analysis against the static
//! indicator catalog. Scoring is order-sensitive: categories are checked
//! in catalog declaration order, then formatting anomalies, links, and
//! sensitive-information requests. Pure given its input; identical
//! messages always produce identical breakdowns.

use crate::catalog::{
    CATALOG, FORMATTING_DESCRIPTION, GENERIC_URL_DESCRIPTION, SENSITIVE_INFO_DESCRIPTION,
    SENSITIVE_INFO_KEYWORDS, SHORTENED_URL_DESCRIPTION,
};
use aho_corasick::AhoCorasick;
use regex::Regex;
use scamcheck_core::{AnalysisVerdict, Error, Result};

/// Known link-shortener hosts
const SHORTENED_URL_PATTERNS: &[&str] = &["bit.ly", "tinyurl", "goo.gl"];

/// Generic URL markers; only scored when other signals are present
const GENERIC_URL_PATTERNS: &[&str] = &["http://", "https://", "www."];

/// Messages shorter than this with zero matches get a score reduction
const LENIENCY_LENGTH: usize = 50;

/// Raw output of the heuristic scoring pass, before explanation synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Matched pattern descriptions in detection order (no sentinel entry)
    pub patterns: Vec<String>,

    /// Matched keyword literals, first-seen order, deduplicated, capped
    pub suspicious_phrases: Vec<String>,

    /// Final score, clamped to [0, 100]
    pub score: u8,
}

/// Keyword and formatting scorer over the static catalog
pub struct HeuristicScorer {
    /// One matcher per catalog category, in catalog order
    category_matchers: Vec<AhoCorasick>,
    sensitive_info: AhoCorasick,
    shortened_urls: AhoCorasick,
    generic_urls: AhoCorasick,
    whitespace_run: Regex,
    case_break: Regex,
}

impl HeuristicScorer {
    /// Create a new scorer, compiling all matchers
    pub fn new() -> Result<Self> {
        let category_matchers = CATALOG
            .iter()
            .map(|category| Self::build_matcher(category.keywords))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category_matchers,
            sensitive_info: Self::build_matcher(SENSITIVE_INFO_KEYWORDS)?,
            shortened_urls: Self::build_matcher(SHORTENED_URL_PATTERNS)?,
            generic_urls: Self::build_matcher(GENERIC_URL_PATTERNS)?,
            whitespace_run: Regex::new(r"\s{3,}").map_err(|e| {
                Error::classifier(format!("failed to compile whitespace regex: {e}"))
            })?,
            case_break: Regex::new(r"[a-z][A-Z]").map_err(|e| {
                Error::classifier(format!("failed to compile case-break regex: {e}"))
            })?,
        })
    }

    /// Build a case-insensitive substring matcher from keywords
    fn build_matcher(keywords: &[&str]) -> Result<AhoCorasick> {
        AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(keywords)
            .map_err(|e| Error::classifier(format!("failed to build keyword matcher: {e}")))
    }

    /// Score a message against the catalog and formatting heuristics.
    ///
    /// The caller guarantees the message is non-empty and within the
    /// accepted length bound.
    pub fn score(&self, message: &str) -> ScoreBreakdown {
        let mut patterns = Vec::new();
        let mut phrases = Vec::new();
        let mut score: i32 = 0;

        // Category keyword matches, catalog order. Overlapping search so
        // that every keyword present in the text counts, not just the
        // first of two keywords sharing a prefix.
        for (category, matcher) in CATALOG.iter().zip(&self.category_matchers) {
            let mut matched = vec![false; category.keywords.len()];
            for m in matcher.find_overlapping_iter(message) {
                matched[m.pattern().as_usize()] = true;
            }

            let matched_keywords: Vec<&str> = category
                .keywords
                .iter()
                .zip(&matched)
                .filter_map(|(keyword, hit)| hit.then_some(*keyword))
                .collect();

            if !matched_keywords.is_empty() {
                patterns.push(category.description.to_string());
                phrases.extend(matched_keywords.iter().take(3).map(|k| k.to_string()));
                score += 15 + 5 * matched_keywords.len() as i32;
            }
        }

        if self.has_formatting_anomalies(message) {
            patterns.push(FORMATTING_DESCRIPTION.to_string());
            score += 10;
        }

        // Shortened links always count; a plain URL only counts alongside
        // at least one other signal.
        if self.shortened_urls.is_match(message) {
            patterns.push(SHORTENED_URL_DESCRIPTION.to_string());
            score += 20;
        } else if self.generic_urls.is_match(message) && !patterns.is_empty() {
            patterns.push(GENERIC_URL_DESCRIPTION.to_string());
            score += 10;
        }

        if self.sensitive_info.is_match(message) {
            patterns.push(SENSITIVE_INFO_DESCRIPTION.to_string());
            score += 25;
        }

        let mut score = score.clamp(0, 100);

        // Short benign messages are nudged toward zero.
        if patterns.is_empty() && message.chars().count() < LENIENCY_LENGTH {
            score = (score - 10).max(0);
        }

        ScoreBreakdown {
            patterns,
            suspicious_phrases: AnalysisVerdict::dedup_phrases(phrases),
            score: score as u8,
        }
    }

    /// Check for formatting anomalies typical of scam messages
    fn has_formatting_anomalies(&self, message: &str) -> bool {
        let exclamations = message.chars().filter(|c| *c == '!').count();
        if exclamations > 2 {
            return true;
        }

        let shouted_words = message
            .split_whitespace()
            .filter(|word| {
                word.chars().count() > 3
                    && word.chars().any(|c| c.is_alphabetic())
                    && *word == word.to_uppercase()
            })
            .count();
        if shouted_words > 2 {
            return true;
        }

        self.whitespace_run.is_match(message) || self.case_break.is_match(message)
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new().expect("failed to create heuristic scorer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    fn scorer() -> HeuristicScorer {
        HeuristicScorer::new().unwrap()
    }

    #[test]
    fn test_single_keyword_scores_twenty() {
        let breakdown = scorer().score("This is urgent business");

        assert_eq!(breakdown.score, 20);
        assert_eq!(breakdown.patterns, vec![CATALOG[0].description]);
        assert_eq!(breakdown.suspicious_phrases, vec!["urgent"]);
    }

    #[test]
    fn test_single_prize_keyword_scores_twenty() {
        let breakdown = scorer().score("Our winner announcement goes out on Friday.");

        assert_eq!(breakdown.score, 20);
        assert_eq!(breakdown.patterns, vec!["Too-good-to-be-true offers or prizes"]);
        assert_eq!(breakdown.suspicious_phrases, vec!["winner"]);
    }

    #[test]
    fn test_benign_message_scores_zero() {
        let breakdown = scorer().score("Hey, are we still on for lunch tomorrow?");

        assert_eq!(breakdown.score, 0);
        assert!(breakdown.patterns.is_empty());
        assert!(breakdown.suspicious_phrases.is_empty());
    }

    #[test]
    fn test_classic_phishing_message() {
        let breakdown = scorer()
            .score("URGENT!!! Your account is suspended. Click here to verify account now: http://bit.ly/x");

        assert!(breakdown.patterns.contains(&"Urgent or time-pressured language".to_string()));
        assert!(breakdown
            .patterns
            .contains(&"Impersonation of official organizations".to_string()));
        assert!(breakdown.patterns.contains(&FORMATTING_DESCRIPTION.to_string()));
        assert!(breakdown.patterns.contains(&SHORTENED_URL_DESCRIPTION.to_string()));

        // urgent + suspended (25), verify account + click here (25),
        // three exclamation marks (10), shortened link (20)
        assert_eq!(breakdown.score, 80);
        assert_eq!(
            breakdown.suspicious_phrases,
            vec!["urgent", "suspended", "verify account", "click here"]
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        let breakdown = scorer().score("WIRE TRANSFER required");
        assert_eq!(
            breakdown.patterns,
            vec!["Requests for payment or financial information"]
        );
        assert_eq!(breakdown.suspicious_phrases, vec!["wire transfer"]);
    }

    #[test]
    fn test_overlapping_keywords_both_count() {
        // "expires" contains "expire"; both are catalog keywords and both
        // must count toward the category total.
        let breakdown = scorer().score("Your coupon expires at midnight tonight, use it soon");

        assert_eq!(breakdown.score, 25);
        assert_eq!(breakdown.suspicious_phrases, vec!["expires", "expire"]);
    }

    #[test]
    fn test_phrases_capped_and_first_seen_order() {
        let breakdown = scorer().score(
            "URGENT!   Act now or face legal action and arrest! Send money immediately \
             via wire transfer or gift card, settle the invoice in bitcoin. You've won \
             the lottery, congratulations winner! Click here to verify account and \
             confirm identity: http://bit.ly/claim. Provide your social security number, \
             credit card and password.",
        );

        assert_eq!(breakdown.score, 100);
        assert_eq!(breakdown.suspicious_phrases.len(), 8);
        assert_eq!(breakdown.suspicious_phrases[0], "urgent");
        // No duplicates
        let mut deduped = breakdown.suspicious_phrases.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), breakdown.suspicious_phrases.len());
    }

    #[test]
    fn test_at_most_three_phrases_per_category() {
        let breakdown =
            scorer().score("urgent, act now, hurry, last chance, final notice, do it immediately");

        // One category matched, many keywords; only the first three
        // keywords in list order are reported as phrases.
        assert_eq!(breakdown.patterns.len(), 1);
        assert_eq!(
            breakdown.suspicious_phrases,
            vec!["urgent", "immediately", "act now"]
        );
    }

    #[test]
    fn test_bare_url_alone_scores_nothing() {
        let breakdown = scorer().score("Check out https://example.com");

        assert_eq!(breakdown.score, 0);
        assert!(breakdown.patterns.is_empty());
    }

    #[test]
    fn test_url_with_prior_signal_scores_ten() {
        let breakdown = scorer().score("urgent: see https://example.com for the full details");

        assert_eq!(
            breakdown.patterns,
            vec![
                "Urgent or time-pressured language".to_string(),
                GENERIC_URL_DESCRIPTION.to_string(),
            ]
        );
        assert_eq!(breakdown.score, 30);
    }

    #[test]
    fn test_shortened_url_takes_precedence_over_generic() {
        let breakdown = scorer().score("urgent, act on http://bit.ly/x");

        assert!(breakdown.patterns.contains(&SHORTENED_URL_DESCRIPTION.to_string()));
        assert!(!breakdown.patterns.contains(&GENERIC_URL_DESCRIPTION.to_string()));
        assert_eq!(breakdown.score, 40);
    }

    #[test]
    fn test_sensitive_info_adds_pattern_without_phrases() {
        let breakdown = scorer().score("please reply with the password for the shared drive");

        assert_eq!(breakdown.patterns, vec![SENSITIVE_INFO_DESCRIPTION]);
        assert_eq!(breakdown.score, 25);
        assert!(breakdown.suspicious_phrases.is_empty());
    }

    #[test]
    fn test_formatting_exclamation_marks() {
        assert_eq!(scorer().score("wow!! that is great news").score, 0);

        let breakdown = scorer().score("wow!!! that is great news");
        assert_eq!(breakdown.patterns, vec![FORMATTING_DESCRIPTION]);
        assert_eq!(breakdown.score, 10);
    }

    #[test]
    fn test_formatting_shouted_words() {
        // Three all-caps words longer than three characters
        let breakdown = scorer().score("THIS DEAL looks GREAT and AMAZING to me");
        assert_eq!(breakdown.patterns, vec![FORMATTING_DESCRIPTION]);

        // Two shouted words are tolerated
        assert_eq!(scorer().score("THIS DEAL looks great and amazing to me").score, 0);
    }

    #[test]
    fn test_formatting_whitespace_run() {
        let breakdown = scorer().score("hello   there, long time no talk my friend");
        assert_eq!(breakdown.patterns, vec![FORMATTING_DESCRIPTION]);
        assert_eq!(breakdown.score, 10);
    }

    #[test]
    fn test_formatting_mid_word_case_break() {
        let breakdown = scorer().score("Dear customerYour parcel could not be delivered");
        assert_eq!(breakdown.patterns, vec![FORMATTING_DESCRIPTION]);
        assert_eq!(breakdown.score, 10);
    }

    #[test]
    fn test_score_clamped_to_hundred() {
        let breakdown = scorer().score(
            "urgent immediately act now hurry wire transfer gift card bitcoin crypto \
             payment invoice verify account confirm identity click here you've won \
             congratulations winner prize lottery legal action arrest warrant police \
             lawsuit court penalty fine",
        );
        assert_eq!(breakdown.score, 100);
    }

    #[test]
    fn test_short_benign_message_floors_at_zero() {
        let breakdown = scorer().score("Hi.");
        assert_eq!(breakdown.score, 0);
        assert!(breakdown.patterns.is_empty());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let s = scorer();
        let message = "Congratulations! You've won a prize, claim your gift card now";

        assert_eq!(s.score(message), s.score(message));
    }
}
