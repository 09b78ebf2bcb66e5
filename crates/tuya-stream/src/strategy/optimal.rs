//! Minimum-cost parse.
//!
//! Every prefix length `i` gets the cheapest known encoding of `data[..i]`.
//! From each position the parse relaxes one edge per literal run length
//! (1..=32) and one per match length up to the longest candidate found. The
//! token cost depends only on length, never on distance, so the longest
//! candidate covers every shorter match at that position.

use super::OPTIMAL_CHAIN;
use crate::finder::MatchFinder;
use crate::{Token, LONG_MATCH, MAX_LITERAL, MIN_MATCH};

#[derive(Debug, Clone, Copy)]
enum Step {
    Start,
    Literal(usize),
    Match { distance: usize, length: usize },
}

impl Step {
    fn span(self) -> usize {
        match self {
            Step::Start => 0,
            Step::Literal(run) => run,
            Step::Match { length, .. } => length,
        }
    }
}

fn match_cost(length: usize) -> usize {
    if length < LONG_MATCH {
        2
    } else {
        3
    }
}

pub(crate) fn parse(data: &[u8]) -> Vec<Token<'_>> {
    let n = data.len();
    let mut cost = vec![usize::MAX; n + 1];
    let mut step = vec![Step::Start; n + 1];
    cost[0] = 0;

    let mut finder = MatchFinder::new(data, OPTIMAL_CHAIN);
    for pos in 0..n {
        let base = cost[pos];
        let mut relax = |to: usize, extra: usize, via: Step| {
            if base + extra < cost[to] {
                cost[to] = base + extra;
                step[to] = via;
            }
        };

        for run in 1..=MAX_LITERAL.min(n - pos) {
            relax(pos + run, run + 1, Step::Literal(run));
        }
        if let Some(m) = finder.longest(pos) {
            for length in MIN_MATCH..=m.length {
                relax(
                    pos + length,
                    match_cost(length),
                    Step::Match {
                        distance: m.distance,
                        length,
                    },
                );
            }
        }
    }

    let mut tokens = Vec::new();
    let mut end = n;
    while end > 0 {
        let via = step[end];
        let start = end - via.span();
        tokens.push(match via {
            Step::Literal(_) => Token::Literal(&data[start..end]),
            Step::Match { distance, length } => Token::Match { distance, length },
            Step::Start => unreachable!("every non-empty prefix is reachable by literals"),
        });
        end = start;
    }
    tokens.reverse();
    debug!("optimal: {} bytes parsed at cost {}", n, cost[n]);
    tokens
}
