//! Hash-chained sliding-window match finder (LZ77).
//!
//! The finder owns a 64 KiB staging buffer: the most recent 32 KiB of
//! input are eligible as match sources (the DEFLATE distance limit), the
//! rest is staging room so the buffer slides rarely. Input fed through
//! [`MatchFinder::feed`] is copied into the buffer, so bytes from earlier
//! calls remain valid match sources for later ones.
//!
//! A hash of each 3-byte prefix indexes the head of a chain of prior
//! positions with the same prefix. The search is greedy: it walks the
//! chain newest-first for a bounded number of probes and keeps the first
//! longest run it sees, which also breaks length ties in favor of the
//! smallest distance (short distances cost no more bits under the fixed
//! distance codes, but keep the window hot). Levels 5 and up add a
//! one-position lazy lookahead: a match is deferred behind a literal when
//! the very next position holds a strictly longer one.
//!
//! Matches never extend past the end of the bytes currently fed; the
//! finder does not speculate about future input.

use crate::token::Token;
use swiftflate_core::error::Result;

/// Maximum back-reference distance (RFC 1951).
pub const WINDOW_SIZE: usize = 32768;

/// Minimum match length worth a copy token.
pub const MIN_MATCH: usize = 3;

/// Maximum match length (RFC 1951).
pub const MAX_MATCH: usize = 258;

/// Hash table size; 15 bits keeps the table in cache.
const HASH_BITS: u32 = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;

const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// Sentinel for "no position" in the hash chains.
const EMPTY: u32 = u32::MAX;

/// Minimum-length matches further back than this are not worth a copy
/// token under the fixed codes; emit literals instead.
const TOO_FAR: usize = 4096;

/// Per-level search effort: (max chain probes, lazy lookahead).
fn level_params(level: u8) -> (usize, bool) {
    match level {
        0 | 1 => (4, false),
        2 => (8, false),
        3 => (16, false),
        4 => (32, false),
        5 => (64, true),
        6 => (128, true),
        7 => (256, true),
        8 => (1024, true),
        _ => (4096, true),
    }
}

/// Hash-indexed sliding-window match finder.
#[derive(Debug)]
pub struct MatchFinder {
    /// Staging buffer: 32 KiB of history plus 32 KiB of slide slack.
    window: Vec<u8>,
    /// Bytes of valid data in the window.
    wpos: usize,
    /// Hash -> most recent position with that 3-byte prefix.
    head: Vec<u32>,
    /// Position -> previous position with the same hash, keyed by
    /// `pos & WINDOW_MASK`.
    prev: Vec<u32>,
    /// Chain probe budget.
    max_chain: usize,
    /// One-position lazy lookahead enabled.
    lazy: bool,
}

impl MatchFinder {
    /// Create a finder tuned for the given compression level (1-9).
    pub fn new(level: u8) -> Self {
        let (max_chain, lazy) = level_params(level);
        Self {
            window: vec![0; WINDOW_SIZE * 2],
            wpos: 0,
            head: vec![EMPTY; HASH_SIZE],
            prev: vec![EMPTY; WINDOW_SIZE],
            max_chain,
            lazy,
        }
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        self.wpos = 0;
        self.head.fill(EMPTY);
        self.prev.fill(EMPTY);
    }

    #[inline(always)]
    fn hash_at(&self, pos: usize) -> usize {
        let v = u32::from(self.window[pos])
            | u32::from(self.window[pos + 1]) << 8
            | u32::from(self.window[pos + 2]) << 16;
        (v.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
    }

    /// Record `pos` as the newest occurrence of its 3-byte prefix.
    ///
    /// Caller guarantees `pos + MIN_MATCH <= self.wpos`.
    #[inline(always)]
    fn insert(&mut self, pos: usize) {
        let h = self.hash_at(pos);
        self.prev[pos & WINDOW_MASK] = self.head[h];
        self.head[h] = pos as u32;
    }

    /// Find the longest match for the bytes at `pos`, bounded by `end`.
    fn longest_match(&self, pos: usize, end: usize) -> Option<(u16, u16)> {
        let limit = (end - pos).min(MAX_MATCH);
        if limit < MIN_MATCH {
            return None;
        }

        let mut cand = self.head[self.hash_at(pos)];
        let mut best_len = MIN_MATCH - 1;
        let mut best_dist = 0usize;
        let mut probes = self.max_chain;

        while cand != EMPTY {
            let cpos = cand as usize;
            if cpos >= pos || pos - cpos > WINDOW_SIZE {
                break;
            }

            // Quick reject: a better match must at least extend past the
            // current best length.
            if self.window[cpos + best_len] == self.window[pos + best_len] {
                let mut len = 0;
                while len < limit && self.window[cpos + len] == self.window[pos + len] {
                    len += 1;
                }
                if len > best_len {
                    best_len = len;
                    best_dist = pos - cpos;
                    if len == limit {
                        break;
                    }
                }
            }

            probes -= 1;
            if probes == 0 {
                break;
            }
            // Chain slots alias every 32 KiB; a non-decreasing link means
            // the slot was overwritten by a newer position.
            let next = self.prev[cpos & WINDOW_MASK];
            if next >= cand {
                break;
            }
            cand = next;
        }

        if best_len < MIN_MATCH || (best_len == MIN_MATCH && best_dist > TOO_FAR) {
            return None;
        }
        Some((best_len as u16, best_dist as u16))
    }

    /// Feed `input` through the finder, emitting tokens in stream order.
    ///
    /// The input is staged into the window chunk by chunk, so a single
    /// call may be arbitrarily large. Bytes fed here stay referencable by
    /// later calls up to the 32 KiB distance limit.
    pub fn feed<F>(&mut self, input: &[u8], emit: &mut F) -> Result<()>
    where
        F: FnMut(Token) -> Result<()>,
    {
        let mut consumed = 0;
        while consumed < input.len() {
            // Slide only when the staging room is exhausted, so the full
            // 32 KiB of reachable history survives each slide.
            if self.wpos == self.window.len() {
                self.slide();
            }
            let space = self.window.len() - self.wpos;
            let take = space.min(input.len() - consumed);
            let start = self.wpos;
            let end = start + take;
            self.window[start..end].copy_from_slice(&input[consumed..consumed + take]);
            self.wpos = end;

            self.run(start, end, emit)?;

            consumed += take;
        }
        Ok(())
    }

    /// Tokenize the window region `[start, end)`.
    fn run<F>(&mut self, start: usize, end: usize, emit: &mut F) -> Result<()>
    where
        F: FnMut(Token) -> Result<()>,
    {
        // Last position with a full 3-byte prefix to hash.
        let insert_limit = end.saturating_sub(MIN_MATCH - 1);
        let mut pos = start;

        while pos < end {
            let found = if end - pos >= MIN_MATCH {
                self.longest_match(pos, end)
            } else {
                None
            };

            let Some((len, dist)) = found else {
                emit(Token::Literal(self.window[pos]))?;
                if pos < insert_limit {
                    self.insert(pos);
                }
                pos += 1;
                continue;
            };

            let mut cur_inserted = false;
            if self.lazy && (len as usize) < MAX_MATCH && pos + 1 + MIN_MATCH <= end {
                self.insert(pos);
                cur_inserted = true;
                if let Some((next_len, _)) = self.longest_match(pos + 1, end) {
                    if next_len > len {
                        // The next position matches longer; emit this byte
                        // as a literal and revisit.
                        emit(Token::Literal(self.window[pos]))?;
                        pos += 1;
                        continue;
                    }
                }
            }

            emit(Token::Copy { len, dist })?;
            let mut p = if cur_inserted { pos + 1 } else { pos };
            let stop = (pos + len as usize).min(insert_limit);
            while p < stop {
                self.insert(p);
                p += 1;
            }
            pos += len as usize;
        }

        Ok(())
    }

    /// Drop the oldest 32 KiB and rebase the hash chains.
    fn slide(&mut self) {
        let shift = WINDOW_SIZE;
        self.window.copy_within(shift..self.wpos, 0);
        self.wpos -= shift;

        for entry in &mut self.head {
            *entry = if *entry != EMPTY && *entry as usize >= shift {
                *entry - shift as u32
            } else {
                EMPTY
            };
        }
        for entry in &mut self.prev {
            *entry = if *entry != EMPTY && *entry as usize >= shift {
                *entry - shift as u32
            } else {
                EMPTY
            };
        }
    }
}
