// noncontiguous.rs - The trie plus failure links, searched directly.
//
// Lowest memory of the three representations. Each state owns a sorted
// sparse edge list; a missing edge means following the failure link.

use crate::automaton::{Automaton, StateID, DEAD, FAIL, START};
use crate::failure::fill_failure_links;
use crate::patterns::PatternID;
use crate::trie::{State, Trie};

/// Noncontiguous NFA. Also the input to the other two representations.
#[derive(Debug, Clone)]
pub(crate) struct NFA {
    states: Vec<State>,
    memory_usage: usize,
}

impl NFA {
    /// Compute failure links for `trie` and wrap it.
    pub(crate) fn new(mut trie: Trie) -> NFA {
        fill_failure_links(&mut trie);
        let mut states = trie.states;
        states.shrink_to_fit();
        let memory_usage = states.capacity() * std::mem::size_of::<State>()
            + states.iter().map(State::memory_usage).sum::<usize>();
        NFA {
            states,
            memory_usage,
        }
    }

    pub(crate) fn states(&self) -> &[State] {
        &self.states
    }

    /// Bytes that leave START for a state other than START, in order.
    pub(crate) fn start_bytes(&self) -> Vec<u8> {
        self.states[START as usize]
            .trans
            .iter()
            .filter(|&&(_, next)| next != START)
            .map(|&(b, _)| b)
            .collect()
    }
}

impl Automaton for NFA {
    #[inline]
    fn start_state(&self) -> StateID {
        START
    }

    #[inline]
    fn next_state(&self, mut sid: StateID, byte: u8) -> StateID {
        // START and DEAD have every edge, so the walk always ends.
        loop {
            let state = &self.states[sid as usize];
            let next = state.next(byte);
            if next != FAIL {
                return next;
            }
            sid = state.fail;
        }
    }

    #[inline]
    fn is_dead(&self, sid: StateID) -> bool {
        sid == DEAD
    }

    #[inline]
    fn match_len(&self, sid: StateID) -> usize {
        self.states[sid as usize].matches.len()
    }

    #[inline]
    fn match_pattern(&self, sid: StateID, index: usize) -> PatternID {
        self.states[sid as usize].matches[index]
    }

    fn memory_usage(&self) -> usize {
        self.memory_usage
    }
}
