// failure.rs - Breadth-first computation of failure links.
//
// After this pass every state knows where to continue when its own edges run
// out, and every state reports the patterns of its failure state after its
// own. Leftmost kinds cut the chain at match states by failing to DEAD.

use std::collections::VecDeque;

use crate::automaton::{StateID, DEAD, FAIL, START};
use crate::trie::{State, Trie};

/// Fill in `fail` for every state below START and propagate match lists.
pub(crate) fn fill_failure_links(trie: &mut Trie) {
    let leftmost = trie.match_kind.is_leftmost();
    let states = &mut trie.states;
    let mut queue: VecDeque<StateID> = VecDeque::new();

    // Children of START fail back to START, which is their default.
    for i in 0..states[START as usize].trans.len() {
        let next = states[START as usize].trans[i].1;
        if next == START {
            continue;
        }
        queue.push_back(next);
        // A leftmost search that has seen a match must never go back to
        // START looking for a later one.
        if leftmost && states[next as usize].is_match() {
            states[next as usize].fail = DEAD;
        }
    }

    while let Some(id) = queue.pop_front() {
        for i in 0..states[id as usize].trans.len() {
            let (byte, next) = states[id as usize].trans[i];
            queue.push_back(next);
            // Setting DEAD on match states is enough: every state below one
            // inherits DEAD through the walk further down.
            if leftmost && states[next as usize].is_match() {
                states[next as usize].fail = DEAD;
                continue;
            }
            let mut fail = states[id as usize].fail;
            while states[fail as usize].next(byte) == FAIL {
                fail = states[fail as usize].fail;
            }
            let fail = states[fail as usize].next(byte);
            debug_assert!(
                fail == DEAD || states[fail as usize].depth < states[next as usize].depth,
                "failure link must point to a shallower state"
            );
            states[next as usize].fail = fail;
            copy_matches(states, fail, next);
        }
    }
}

/// Append the match list of `src` to the one of `dst`.
fn copy_matches(states: &mut [State], src: StateID, dst: StateID) {
    debug_assert_ne!(src, dst);
    if states[src as usize].matches.is_empty() {
        return;
    }
    let inherited = states[src as usize].matches.clone();
    states[dst as usize].matches.extend_from_slice(&inherited);
}
