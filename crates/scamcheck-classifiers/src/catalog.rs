//! Static catalog of scam indicator categories
//!
//! Pure configuration data, fixed at compile time. The heuristic scorer
//! iterates the table in declaration order; that order is part of the
//! scoring contract (it determines pattern and phrase ordering in the
//! verdict).

/// A named class of scam tactic detected via keyword presence
#[derive(Debug, Clone, Copy)]
pub struct IndicatorCategory {
    /// Stable identifier, unique within the catalog
    pub key: &'static str,

    /// Human-readable description surfaced in verdicts
    pub description: &'static str,

    /// Lowercase trigger phrases, matched case-insensitively as substrings
    pub keywords: &'static [&'static str],
}

/// Ordered indicator categories checked by the heuristic scorer
pub const CATALOG: &[IndicatorCategory] = &[
    IndicatorCategory {
        key: "urgent_language",
        description: "Urgent or time-pressured language",
        keywords: &[
            "urgent",
            "immediately",
            "act now",
            "limited time",
            "expires",
            "hurry",
            "today only",
            "last chance",
            "final notice",
            "suspended",
            "locked",
            "expire",
        ],
    },
    IndicatorCategory {
        key: "payment_request",
        description: "Requests for payment or financial information",
        keywords: &[
            "wire transfer",
            "gift card",
            "bitcoin",
            "crypto",
            "payment",
            "send money",
            "pay now",
            "invoice",
            "western union",
            "paypal",
            "venmo",
            "cash app",
            "zelle",
        ],
    },
    IndicatorCategory {
        key: "impersonation",
        description: "Impersonation of official organizations",
        keywords: &[
            "verify account",
            "confirm identity",
            "update information",
            "security alert",
            "unusual activity",
            "click here",
            "log in",
            "reset password",
            "suspended account",
            "unauthorized access",
        ],
    },
    IndicatorCategory {
        key: "prizes",
        description: "Too-good-to-be-true offers or prizes",
        keywords: &[
            "you've won",
            "congratulations",
            "winner",
            "prize",
            "lottery",
            "claim your",
            "free gift",
            "selected",
            "lucky",
        ],
    },
    IndicatorCategory {
        key: "threats",
        description: "Threats or legal intimidation",
        keywords: &[
            "legal action",
            "arrest",
            "warrant",
            "police",
            "lawsuit",
            "court",
            "penalty",
            "fine",
            "consequences",
            "investigation",
        ],
    },
];

/// Keywords that ask for sensitive personal information.
///
/// Not part of the category table; a match triggers its own score bump
/// and pattern entry but contributes no suspicious phrases.
pub const SENSITIVE_INFO_KEYWORDS: &[&str] = &[
    "social security",
    "ssn",
    "credit card",
    "bank account",
    "password",
    "pin",
    "date of birth",
];

/// Pattern description for the formatting-anomaly check
pub const FORMATTING_DESCRIPTION: &str = "Poor grammar or unusual formatting";

/// Pattern description for shortened-link detection
pub const SHORTENED_URL_DESCRIPTION: &str = "Shortened or suspicious URLs";

/// Pattern description for plain links accompanying other signals
pub const GENERIC_URL_DESCRIPTION: &str = "Contains links (verify before clicking)";

/// Pattern description for sensitive-information requests
pub const SENSITIVE_INFO_DESCRIPTION: &str = "Requests for sensitive personal information";
