//! The four parse strategies, one per [`CompressionLevel`](crate::CompressionLevel).
//!
//! Each turns the input into a token list; serialization is shared.

pub(crate) mod balanced;
pub(crate) mod fast;
pub(crate) mod none;
pub(crate) mod optimal;

use crate::Token;

/// Chain entries visited per query. Deeper levels must never visit fewer
/// entries than shallower ones.
pub(crate) const FAST_CHAIN: usize = 8;
pub(crate) const BALANCED_CHAIN: usize = 64;
pub(crate) const OPTIMAL_CHAIN: usize = 256;

/// Appends a literal token unless the run is empty.
pub(crate) fn push_literal<'a>(tokens: &mut Vec<Token<'a>>, run: &'a [u8]) {
    if !run.is_empty() {
        tokens.push(Token::Literal(run));
    }
}
