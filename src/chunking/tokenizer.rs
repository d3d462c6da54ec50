//! Token/character size conversions

/// Approximate characters per token for Italian prose
pub const CHARS_PER_TOKEN: usize = 4;

/// Converts between token-based configuration and character budgets.
///
/// No real tokenizer is involved; sizes are estimates.
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Estimate character count from token count
    pub fn estimate_chars(token_count: usize) -> usize {
        token_count.saturating_mul(CHARS_PER_TOKEN)
    }

    /// Estimate token count from character count
    pub fn estimate_tokens(char_count: usize) -> usize {
        char_count.div_ceil(CHARS_PER_TOKEN)
    }
}
