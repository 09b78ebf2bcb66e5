//! Greedy parse: take the first usable candidate, never look back.

use super::{push_literal, FAST_CHAIN};
use crate::finder::MatchFinder;
use crate::Token;

pub(crate) fn parse(data: &[u8]) -> Vec<Token<'_>> {
    let mut finder = MatchFinder::new(data, FAST_CHAIN);
    let mut tokens = Vec::new();
    let mut anchor = 0;
    let mut pos = 0;

    while pos < data.len() {
        match finder.first(pos) {
            Some(m) => {
                push_literal(&mut tokens, &data[anchor..pos]);
                trace!("fast: match at {pos} distance={} length={}", m.distance, m.length);
                tokens.push(Token::Match {
                    distance: m.distance,
                    length: m.length,
                });
                pos += m.length;
                anchor = pos;
            }
            None => pos += 1,
        }
    }
    push_literal(&mut tokens, &data[anchor..]);
    tokens
}
