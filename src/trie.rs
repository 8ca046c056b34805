// trie.rs - Trie construction, the first step of every automaton.
//
// States live in one arena and refer to each other by `StateID`. The first
// three slots are the FAIL sentinel, the DEAD state and the START state.

use smallvec::SmallVec;

use crate::automaton::{StateID, DEAD, FAIL, START};
use crate::error::MatchError;
use crate::options::MatchKind;
use crate::patterns::PatternID;

/// A trie node, later extended with its failure link.
#[derive(Debug, Clone)]
pub(crate) struct State {
    /// Outgoing edges sorted by byte. Exactly 256 entries means the list is
    /// indexable by byte directly.
    pub(crate) trans: Vec<(u8, StateID)>,
    pub(crate) fail: StateID,
    /// Patterns reported in this state, in reporting order.
    pub(crate) matches: SmallVec<[PatternID; 2]>,
    /// Length of the path from START.
    pub(crate) depth: u32,
}

impl State {
    fn new(depth: u32) -> State {
        State {
            trans: Vec::new(),
            fail: START,
            matches: SmallVec::new(),
            depth,
        }
    }

    /// Edge on `byte`, or [`FAIL`] if there is none.
    #[inline]
    pub(crate) fn next(&self, byte: u8) -> StateID {
        if self.trans.len() == 256 {
            return self.trans[byte as usize].1;
        }
        match self.trans.binary_search_by_key(&byte, |&(b, _)| b) {
            Ok(i) => self.trans[i].1,
            Err(_) => FAIL,
        }
    }

    pub(crate) fn set_next(&mut self, byte: u8, next: StateID) {
        match self.trans.binary_search_by_key(&byte, |&(b, _)| b) {
            Ok(i) => self.trans[i].1 = next,
            Err(i) => self.trans.insert(i, (byte, next)),
        }
    }

    #[inline]
    pub(crate) fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }

    pub(crate) fn memory_usage(&self) -> usize {
        let matches = if self.matches.spilled() {
            self.matches.capacity() * std::mem::size_of::<PatternID>()
        } else {
            0
        };
        self.trans.capacity() * std::mem::size_of::<(u8, StateID)>() + matches
    }
}

/// Trie of all patterns, without failure links yet.
#[derive(Debug, Clone)]
pub(crate) struct Trie {
    pub(crate) states: Vec<State>,
    pub(crate) match_kind: MatchKind,
}

/// Inserts patterns one at a time, as they come out of the pattern source.
pub(crate) struct TrieBuilder {
    states: Vec<State>,
    match_kind: MatchKind,
}

impl TrieBuilder {
    pub(crate) fn new(match_kind: MatchKind) -> TrieBuilder {
        let mut states = Vec::with_capacity(3);
        // FAIL, DEAD, START.
        for _ in 0..3 {
            states.push(State::new(0));
        }
        states[FAIL as usize].fail = FAIL;
        states[DEAD as usize].fail = DEAD;
        states[START as usize].fail = START;
        TrieBuilder { states, match_kind }
    }

    /// Insert pattern `pid`.
    ///
    /// Under leftmost-first semantics a pattern that extends an earlier,
    /// complete pattern can never be reported, so it is left out of the trie.
    pub(crate) fn add(&mut self, pid: PatternID, pattern: &[u8]) -> Result<(), MatchError> {
        if pattern.is_empty() {
            return Err(MatchError::InvalidPattern { index: pid });
        }
        let leftmost_first = self.match_kind.is_leftmost_first();
        let mut prev = START;
        let mut saw_match = false;
        for (depth, &byte) in pattern.iter().enumerate() {
            saw_match = saw_match || self.states[prev as usize].is_match();
            if leftmost_first && saw_match {
                return Ok(());
            }
            let next = self.states[prev as usize].next(byte);
            prev = if next != FAIL {
                next
            } else {
                let next = self.add_state(depth as u32 + 1)?;
                self.states[prev as usize].set_next(byte, next);
                next
            };
        }
        self.states[prev as usize].matches.push(pid);
        Ok(())
    }

    fn add_state(&mut self, depth: u32) -> Result<StateID, MatchError> {
        let id = StateID::try_from(self.states.len()).map_err(|_| MatchError::StateIDOverflow {
            max: u64::from(StateID::MAX),
        })?;
        self.states.push(State::new(depth));
        Ok(id)
    }

    /// Close the START and DEAD loops and hand over the trie.
    pub(crate) fn finish(mut self) -> Trie {
        let start = &mut self.states[START as usize];
        for byte in 0..=255u8 {
            if start.next(byte) == FAIL {
                start.set_next(byte, START);
            }
        }
        self.states[DEAD as usize].trans = (0..=255u8).map(|b| (b, DEAD)).collect();
        Trie {
            states: self.states,
            match_kind: self.match_kind,
        }
    }
}
