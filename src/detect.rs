//! Rejection-mail detection — keyword scan over OCR output.

/// Default phrases that mark a Japanese job-rejection mail.
///
/// These are the stock formulations of the "お祈りメール": the polite
/// we-regret-to-inform-you boilerplate HR departments reuse verbatim.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "不採用",
    "お祈り",
    "残念ながら",
    "難しい",
    "申し訳ございません",
    "添えず",
    "できかねる",
    "ご期待",
];

/// Scans text for rejection-mail wording.
#[derive(Debug, Clone)]
pub struct RejectionDetector {
    keywords: Vec<String>,
}

impl RejectionDetector {
    /// Detector with the stock keyword set.
    pub fn new() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Detector with a custom keyword set. Empty keywords are dropped;
    /// an empty set falls back to the defaults.
    pub fn with_keywords(keywords: Vec<String>) -> Self {
        let keywords: Vec<String> = keywords.into_iter().filter(|k| !k.is_empty()).collect();
        if keywords.is_empty() {
            return Self::new();
        }
        Self { keywords }
    }

    /// True if any keyword occurs anywhere in `text`.
    pub fn contains_rejection(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// The active keyword set.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for RejectionDetector {
    fn default() -> Self {
        Self::new()
    }
}
