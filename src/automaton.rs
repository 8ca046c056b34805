// automaton.rs - Traversal interface shared by every representation.
//
// The set of representations is closed, so `Repr` is an enum and the search
// routines in `search.rs` are generic over `Automaton`. A search matches on
// `Repr` once and then runs monomorphized code for the chosen encoding.

use crate::contiguous;
use crate::dfa;
use crate::noncontiguous;
use crate::options::Implementation;
use crate::patterns::PatternID;

/// Identifier of a state. Its meaning (index or table offset) is private to
/// each representation.
pub(crate) type StateID = u32;

/// Sentinel for "no transition on this byte". Never a state a search visits.
pub(crate) const FAIL: StateID = 0;
/// Absorbing state. Leftmost searches stop once they reach it.
pub(crate) const DEAD: StateID = 1;
/// Root of the trie.
pub(crate) const START: StateID = 2;

/// Read-only view of a compiled automaton.
pub(crate) trait Automaton {
    /// State every search begins in.
    fn start_state(&self) -> StateID;

    /// Follow `byte` out of `sid`, resolving failure links as needed.
    /// Never returns [`FAIL`].
    fn next_state(&self, sid: StateID, byte: u8) -> StateID;

    fn is_dead(&self, sid: StateID) -> bool;

    /// Number of patterns reported by `sid`.
    fn match_len(&self, sid: StateID) -> usize;

    /// The `index`-th pattern reported by `sid`, in reporting order.
    fn match_pattern(&self, sid: StateID, index: usize) -> PatternID;

    #[inline]
    fn is_match(&self, sid: StateID) -> bool {
        self.match_len(sid) > 0
    }

    /// Heap bytes held by this representation.
    fn memory_usage(&self) -> usize;
}

/// The representation chosen at construction time.
#[derive(Debug, Clone)]
pub(crate) enum Repr {
    Noncontiguous(noncontiguous::NFA),
    Contiguous(contiguous::NFA),
    Dfa(dfa::DFA),
}

impl Repr {
    pub(crate) fn implementation(&self) -> Implementation {
        match self {
            Repr::Noncontiguous(_) => Implementation::NoncontiguousNFA,
            Repr::Contiguous(_) => Implementation::ContiguousNFA,
            Repr::Dfa(_) => Implementation::DFA,
        }
    }

    /// Number of states, the same for every representation of one trie.
    pub(crate) fn state_len(&self) -> usize {
        match self {
            Repr::Noncontiguous(nfa) => nfa.states().len(),
            Repr::Contiguous(nfa) => nfa.state_len(),
            Repr::Dfa(dfa) => dfa.state_len(),
        }
    }

    pub(crate) fn memory_usage(&self) -> usize {
        match self {
            Repr::Noncontiguous(nfa) => nfa.memory_usage(),
            Repr::Contiguous(nfa) => nfa.memory_usage(),
            Repr::Dfa(dfa) => dfa.memory_usage(),
        }
    }
}
