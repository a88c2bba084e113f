//! Engine configuration.

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Replies used when even the `NONE` rule produces nothing, one per
    /// phase of the variety counter.
    pub stock_phrases: [String; 4],

    /// Maximum number of link and `PRE` redirections within one reply
    /// (default: 32)
    pub max_redirects: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stock_phrases: ["PLEASE CONTINUE", "HMMM", "GO ON , PLEASE", "I SEE"].map(String::from),
            max_redirects: 32,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the four stock phrases
    pub fn with_stock_phrases(mut self, phrases: [&str; 4]) -> Self {
        self.stock_phrases = phrases.map(String::from);
        self
    }

    /// Set the redirect limit
    pub fn with_max_redirects(mut self, limit: usize) -> Self {
        self.max_redirects = limit;
        self
    }

    /// The stock phrase for a variety counter phase in `1..=4`.
    pub(crate) fn stock_phrase(&self, phase: usize) -> &str {
        &self.stock_phrases[(phase + 3) % 4]
    }
}
