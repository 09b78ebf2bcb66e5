//! Greedy longest-match parse with lazy evaluation.
//!
//! Before committing to the match at `pos`, the match at `pos + 1` is checked;
//! if it is strictly longer the current byte becomes a literal and the check
//! repeats from the new position.

use super::{push_literal, BALANCED_CHAIN};
use crate::finder::MatchFinder;
use crate::Token;

pub(crate) fn parse(data: &[u8]) -> Vec<Token<'_>> {
    let mut finder = MatchFinder::new(data, BALANCED_CHAIN);
    let mut tokens = Vec::new();
    let mut anchor = 0;
    let mut pos = 0;

    while pos < data.len() {
        let Some(mut current) = finder.longest(pos) else {
            pos += 1;
            continue;
        };
        while pos + 1 < data.len() {
            match finder.longest(pos + 1) {
                Some(next) if next.length > current.length => {
                    trace!(
                        "balanced: deferring at {pos}, {} -> {}",
                        current.length,
                        next.length
                    );
                    pos += 1;
                    current = next;
                }
                _ => break,
            }
        }
        push_literal(&mut tokens, &data[anchor..pos]);
        tokens.push(Token::Match {
            distance: current.distance,
            length: current.length,
        });
        pos += current.length;
        anchor = pos;
    }
    push_literal(&mut tokens, &data[anchor..]);
    tokens
}
