// dfa.rs - Full transition table with failure links resolved up front.
//
// `trans[sid * 256 + byte]` is the next state for every state and byte, so a
// search does one load per haystack byte. State ids are the same as in the
// noncontiguous NFA this table is built from.

use std::collections::VecDeque;

use crate::automaton::{Automaton, StateID, DEAD, FAIL, START};
use crate::error::MatchError;
use crate::noncontiguous;
use crate::patterns::PatternID;

const ALPHABET: usize = 256;

#[derive(Debug, Clone)]
pub(crate) struct DFA {
    trans: Vec<StateID>,
    matches: Vec<PatternID>,
    /// `(start, len)` into `matches` per state.
    match_ranges: Vec<(u32, u32)>,
}

impl DFA {
    pub(crate) fn new(nfa: &noncontiguous::NFA) -> Result<DFA, MatchError> {
        let states = nfa.states();
        let len = states
            .len()
            .checked_mul(ALPHABET)
            .ok_or(MatchError::StateIDOverflow {
                max: (usize::MAX / ALPHABET) as u64,
            })?;
        let mut trans = vec![FAIL; len];

        // A state's missing edges copy its failure state's row, so rows are
        // filled shallowest first. DEAD and START have every edge already.
        let mut order: Vec<StateID> = Vec::with_capacity(states.len());
        order.push(DEAD);
        order.push(START);
        let mut queue: VecDeque<StateID> = VecDeque::new();
        queue.push_back(START);
        while let Some(sid) = queue.pop_front() {
            for &(_, next) in &states[sid as usize].trans {
                if next == START || next == sid {
                    continue;
                }
                order.push(next);
                queue.push_back(next);
            }
        }

        for &sid in &order {
            let state = &states[sid as usize];
            let row = sid as usize * ALPHABET;
            let fail_row = state.fail as usize * ALPHABET;
            for byte in 0..ALPHABET {
                let next = state.next(byte as u8);
                trans[row + byte] = if next != FAIL {
                    next
                } else {
                    trans[fail_row + byte]
                };
            }
        }

        let mut matches = Vec::new();
        let mut match_ranges = Vec::with_capacity(states.len());
        for state in states {
            let start = u32::try_from(matches.len()).map_err(|_| MatchError::StateIDOverflow {
                max: u64::from(u32::MAX),
            })?;
            match_ranges.push((start, state.matches.len() as u32));
            matches.extend_from_slice(&state.matches);
        }
        matches.shrink_to_fit();

        Ok(DFA {
            trans,
            matches,
            match_ranges,
        })
    }

    pub(crate) fn state_len(&self) -> usize {
        self.match_ranges.len()
    }
}

impl Automaton for DFA {
    #[inline]
    fn start_state(&self) -> StateID {
        START
    }

    #[inline]
    fn next_state(&self, sid: StateID, byte: u8) -> StateID {
        self.trans[sid as usize * ALPHABET + byte as usize]
    }

    #[inline]
    fn is_dead(&self, sid: StateID) -> bool {
        sid == DEAD
    }

    #[inline]
    fn match_len(&self, sid: StateID) -> usize {
        self.match_ranges[sid as usize].1 as usize
    }

    #[inline]
    fn match_pattern(&self, sid: StateID, index: usize) -> PatternID {
        let (start, _) = self.match_ranges[sid as usize];
        self.matches[start as usize + index]
    }

    fn memory_usage(&self) -> usize {
        self.trans.capacity() * std::mem::size_of::<StateID>()
            + self.matches.capacity() * std::mem::size_of::<PatternID>()
            + self.match_ranges.capacity() * std::mem::size_of::<(u32, u32)>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MatchKind;
    use crate::trie::TrieBuilder;

    fn dfa(kind: MatchKind, patterns: &[&[u8]]) -> (noncontiguous::NFA, DFA) {
        let mut builder = TrieBuilder::new(kind);
        for (pid, p) in patterns.iter().enumerate() {
            builder.add(pid, p).unwrap();
        }
        let nfa = noncontiguous::NFA::new(builder.finish());
        let dfa = DFA::new(&nfa).unwrap();
        (nfa, dfa)
    }

    #[test]
    fn every_edge_matches_the_nfa_walk() {
        let (nfa, dfa) = dfa(MatchKind::Standard, &[b"he", b"she", b"his", b"hers"]);
        assert_eq!(dfa.state_len(), nfa.states().len());
        for sid in (DEAD as usize)..nfa.states().len() {
            for byte in 0..=255u8 {
                assert_eq!(
                    dfa.next_state(sid as StateID, byte),
                    nfa.next_state(sid as StateID, byte),
                    "state {} byte {}",
                    sid,
                    byte
                );
            }
        }
    }

    #[test]
    fn leftmost_rows_reach_dead() {
        let (nfa, dfa) = dfa(MatchKind::LeftmostLongest, &[b"ab", b"abcd", b"bc"]);
        let mut sid = dfa.start_state();
        for &b in b"ab" {
            sid = dfa.next_state(sid, b);
        }
        assert!(dfa.is_match(sid));
        assert_eq!(dfa.match_pattern(sid, 0), 0);
        assert!(dfa.is_dead(dfa.next_state(sid, b'x')));
        assert!(dfa.memory_usage() >= nfa.states().len() * 256 * 4);
    }

    #[test]
    fn never_returns_fail() {
        let (nfa, dfa) = dfa(MatchKind::LeftmostFirst, &[b"abc", b"bcd", b"cde"]);
        for sid in (DEAD as usize)..nfa.states().len() {
            for byte in 0..=255u8 {
                assert_ne!(dfa.next_state(sid as StateID, byte), FAIL);
            }
        }
    }
}
