//! Token estimation.
//!
//! Character-based heuristic: one token per four Unicode code points,
//! rounded up so the estimate is a safe upper bound for budget checks.
//! Counting code points rather than bytes keeps multi-byte text from being
//! over- or under-weighted relative to the ratio.

use serde::{Deserialize, Serialize};

/// Code points per estimated token
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count for a string.
///
/// Zero for empty input; monotonically non-decreasing in length.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Fixed token ceiling that estimates are displayed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBudget {
    pub ceiling: usize,
}

impl TokenBudget {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }

    /// Tokens left under the ceiling; never negative
    pub fn remaining(&self, estimate: usize) -> usize {
        self.ceiling.saturating_sub(estimate)
    }

    pub fn is_exceeded(&self, estimate: usize) -> bool {
        estimate > self.ceiling
    }

    /// Fraction of the ceiling used (may exceed 1.0)
    pub fn utilization(&self, estimate: usize) -> f64 {
        if self.ceiling == 0 {
            return if estimate == 0 { 0.0 } else { f64::INFINITY };
        }
        estimate as f64 / self.ceiling as f64
    }

    /// `estimate / ceiling` display string
    pub fn display(&self, estimate: usize) -> String {
        format!("{} / {}", estimate, self.ceiling)
    }
}
