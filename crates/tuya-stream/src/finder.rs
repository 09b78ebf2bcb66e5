//! Hash-chain match finder shared by the searching strategies.
//!
//! Positions are chained by a hash of their first three bytes, newest first.
//! A query visits at most `max_chain` chain entries and stops at the window
//! edge, so every strategy that uses a deeper chain sees a superset of the
//! candidates a shallower one sees.

use crate::{MAX_MATCH, MIN_MATCH, WINDOW_SIZE};

const HASH_BITS: u32 = 13;
const HASH_SIZE: usize = 1 << HASH_BITS;
const NIL: u32 = u32::MAX;

/// A verified backreference candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match {
    pub distance: usize,
    pub length: usize,
}

pub(crate) struct MatchFinder<'a> {
    data: &'a [u8],
    head: Vec<u32>,
    prev: Vec<u32>,
    inserted: usize,
    max_chain: usize,
}

impl<'a> MatchFinder<'a> {
    pub fn new(data: &'a [u8], max_chain: usize) -> Self {
        Self {
            data,
            head: vec![NIL; HASH_SIZE],
            prev: vec![NIL; data.len()],
            inserted: 0,
            max_chain,
        }
    }

    #[inline]
    fn hash(&self, pos: usize) -> usize {
        let d = self.data;
        let v = u32::from(d[pos]) | u32::from(d[pos + 1]) << 8 | u32::from(d[pos + 2]) << 16;
        (v.wrapping_mul(2_654_435_761) >> (32 - HASH_BITS)) as usize
    }

    /// Chains every position before `pos` that still has a full prefix.
    fn catch_up(&mut self, pos: usize) {
        while self.inserted < pos {
            let p = self.inserted;
            if p + MIN_MATCH <= self.data.len() {
                let h = self.hash(p);
                self.prev[p] = self.head[h];
                self.head[h] = p as u32;
            }
            self.inserted += 1;
        }
    }

    fn match_len(&self, source: usize, pos: usize) -> usize {
        let limit = MAX_MATCH.min(self.data.len() - pos);
        let mut length = 0;
        while length < limit && self.data[source + length] == self.data[pos + length] {
            length += 1;
        }
        length
    }

    /// Verified candidates for `pos`, nearest first.
    ///
    /// Queries must be made with non-decreasing `pos`.
    pub fn candidates(&mut self, pos: usize) -> Candidates<'_, 'a> {
        self.catch_up(pos);
        let next = if pos + MIN_MATCH <= self.data.len() {
            self.head[self.hash(pos)]
        } else {
            NIL
        };
        let budget = self.max_chain;
        Candidates {
            finder: self,
            pos,
            next,
            budget,
        }
    }

    /// First candidate in chain order.
    pub fn first(&mut self, pos: usize) -> Option<Match> {
        self.candidates(pos).next()
    }

    /// Longest candidate; ties go to the nearest.
    pub fn longest(&mut self, pos: usize) -> Option<Match> {
        let ceiling = MAX_MATCH.min(self.data.len() - pos);
        let mut best: Option<Match> = None;
        for candidate in self.candidates(pos) {
            if best.map_or(true, |b| candidate.length > b.length) {
                best = Some(candidate);
                if candidate.length == ceiling {
                    break;
                }
            }
        }
        best
    }
}

pub(crate) struct Candidates<'f, 'a> {
    finder: &'f MatchFinder<'a>,
    pos: usize,
    next: u32,
    budget: usize,
}

impl Iterator for Candidates<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        while self.budget > 0 && self.next != NIL {
            let source = self.next as usize;
            self.next = self.finder.prev[source];
            if source >= self.pos {
                continue;
            }
            self.budget -= 1;
            let distance = self.pos - source;
            if distance > WINDOW_SIZE {
                self.budget = 0;
                break;
            }
            let length = self.finder.match_len(source, self.pos);
            if length >= MIN_MATCH {
                return Some(Match { distance, length });
            }
        }
        None
    }
}
