// search.rs - Left-to-right scans over one haystack.
//
// All routines are generic over `Automaton` so each representation gets its
// own monomorphized loop. None of them look at bytes before `at`.

use crate::api::Match;
use crate::automaton::{Automaton, StateID};
use crate::patterns::PatternTable;
use crate::prefilter::Prefilter;

#[inline]
fn match_at<A: Automaton + ?Sized>(
    aut: &A,
    patterns: &PatternTable,
    sid: StateID,
    index: usize,
    end: usize,
) -> Match {
    let pid = aut.match_pattern(sid, index);
    Match::new(pid, end - patterns.pattern_len(pid), end)
}

/// Standard semantics: the first match the automaton enters, i.e. the one
/// with the smallest end offset at or after `at`.
pub(crate) fn find_standard<A: Automaton + ?Sized>(
    aut: &A,
    patterns: &PatternTable,
    prefilter: Option<Prefilter>,
    haystack: &[u8],
    mut at: usize,
) -> Option<Match> {
    let start = aut.start_state();
    let mut sid = start;
    while at < haystack.len() {
        if sid == start {
            if let Some(pre) = prefilter {
                at = pre.next_candidate(haystack, at);
                if at == haystack.len() {
                    break;
                }
            }
        }
        sid = aut.next_state(sid, haystack[at]);
        at += 1;
        if aut.is_match(sid) {
            return Some(match_at(aut, patterns, sid, 0, at));
        }
    }
    None
}

/// Leftmost semantics. The automaton was built so that the last match seen
/// before reaching DEAD is the leftmost one preferred by the match kind.
///
/// The scan may run past the end of the match it returns while a longer
/// candidate is still alive, and the next call restarts at that match end.
/// With patterns `a` and `a{k}b` over a run of `a`s every byte is read up
/// to `k` times, so the worst case is `O(n * k)` for a haystack of length
/// `n` and longest pattern length `k`.
pub(crate) fn find_leftmost<A: Automaton + ?Sized>(
    aut: &A,
    patterns: &PatternTable,
    prefilter: Option<Prefilter>,
    haystack: &[u8],
    mut at: usize,
) -> Option<Match> {
    let start = aut.start_state();
    let mut sid = start;
    let mut last: Option<Match> = None;
    while at < haystack.len() {
        if sid == start {
            debug_assert!(last.is_none(), "leftmost search returned to START after a match");
            if let Some(pre) = prefilter {
                at = pre.next_candidate(haystack, at);
                if at == haystack.len() {
                    break;
                }
            }
        }
        sid = aut.next_state(sid, haystack[at]);
        at += 1;
        if aut.is_dead(sid) {
            return last;
        }
        if aut.is_match(sid) {
            last = Some(match_at(aut, patterns, sid, 0, at));
        }
    }
    last
}

/// Resumable position of an overlapping search.
#[derive(Debug, Clone, Default)]
pub(crate) struct OverlappingState {
    /// `None` until the first byte is consumed.
    sid: Option<StateID>,
    at: usize,
    /// Next entry of the current state's match list to report.
    next_match: usize,
}

/// Standard semantics, reporting every pattern of every match state visited.
pub(crate) fn find_overlapping<A: Automaton + ?Sized>(
    aut: &A,
    patterns: &PatternTable,
    prefilter: Option<Prefilter>,
    haystack: &[u8],
    state: &mut OverlappingState,
) -> Option<Match> {
    let start = aut.start_state();
    let mut sid = state.sid.unwrap_or(start);
    if state.next_match < aut.match_len(sid) {
        let m = match_at(aut, patterns, sid, state.next_match, state.at);
        state.next_match += 1;
        return Some(m);
    }

    let mut at = state.at;
    while at < haystack.len() {
        if sid == start {
            if let Some(pre) = prefilter {
                at = pre.next_candidate(haystack, at);
                if at == haystack.len() {
                    break;
                }
            }
        }
        sid = aut.next_state(sid, haystack[at]);
        at += 1;
        if aut.is_match(sid) {
            state.sid = Some(sid);
            state.at = at;
            state.next_match = 1;
            return Some(match_at(aut, patterns, sid, 0, at));
        }
    }
    state.sid = Some(sid);
    state.at = at;
    state.next_match = aut.match_len(sid);
    None
}
