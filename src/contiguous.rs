// contiguous.rs - The noncontiguous NFA flattened into a single table.
//
// Every state is a run of `u32` words in `repr` and its `StateID` is the
// offset of that run:
//
//   [ntrans | fail | match start | match count | edges...]
//
// Sparse states store `ntrans` bytes packed four to a word followed by
// `ntrans` targets. States with many edges are dense: `ntrans` is 256 and 256
// targets follow, indexed by byte. FAIL sits at offset 0, so a zero target
// still means "no edge".

use crate::automaton::{Automaton, StateID, DEAD, FAIL, START};
use crate::error::MatchError;
use crate::noncontiguous;
use crate::patterns::PatternID;
use crate::trie::State;

const HEADER: usize = 4;
const DENSE: u32 = 256;
/// States with at least this many edges are stored dense.
const DENSE_THRESHOLD: usize = 32;

#[derive(Debug, Clone)]
pub(crate) struct NFA {
    repr: Vec<u32>,
    matches: Vec<PatternID>,
    start: StateID,
    dead: StateID,
    state_len: usize,
}

fn is_dense(state: &State) -> bool {
    state.trans.len() >= DENSE_THRESHOLD
}

fn state_words(state: &State) -> usize {
    if is_dense(state) {
        HEADER + 256
    } else {
        let n = state.trans.len();
        HEADER + n.div_ceil(4) + n
    }
}

fn overflow() -> MatchError {
    MatchError::StateIDOverflow {
        max: u64::from(u32::MAX),
    }
}

impl NFA {
    pub(crate) fn new(nfa: &noncontiguous::NFA) -> Result<NFA, MatchError> {
        let states = nfa.states();
        let mut offsets: Vec<u32> = Vec::with_capacity(states.len());
        let mut total = 0usize;
        for state in states {
            offsets.push(u32::try_from(total).map_err(|_| overflow())?);
            total += state_words(state);
        }
        u32::try_from(total).map_err(|_| overflow())?;
        let remap = |sid: StateID| offsets[sid as usize];

        let mut repr: Vec<u32> = Vec::with_capacity(total);
        let mut matches: Vec<PatternID> = Vec::new();
        for state in states {
            let dense = is_dense(state);
            repr.push(if dense { DENSE } else { state.trans.len() as u32 });
            repr.push(remap(state.fail));
            repr.push(u32::try_from(matches.len()).map_err(|_| overflow())?);
            repr.push(state.matches.len() as u32);
            matches.extend_from_slice(&state.matches);

            if dense {
                let at = repr.len();
                repr.resize(at + 256, FAIL);
                for &(byte, next) in &state.trans {
                    repr[at + byte as usize] = remap(next);
                }
            } else {
                for chunk in state.trans.chunks(4) {
                    let mut packed = 0u32;
                    for (i, &(byte, _)) in chunk.iter().enumerate() {
                        packed |= u32::from(byte) << (8 * i);
                    }
                    repr.push(packed);
                }
                repr.extend(state.trans.iter().map(|&(_, next)| remap(next)));
            }
        }
        debug_assert_eq!(repr.len(), total);
        matches.shrink_to_fit();

        Ok(NFA {
            repr,
            matches,
            start: remap(START),
            dead: remap(DEAD),
            state_len: states.len(),
        })
    }

    pub(crate) fn state_len(&self) -> usize {
        self.state_len
    }

    #[inline]
    fn follow(&self, sid: StateID, byte: u8) -> StateID {
        let s = sid as usize;
        let ntrans = self.repr[s];
        if ntrans == DENSE {
            return self.repr[s + HEADER + byte as usize];
        }
        let ntrans = ntrans as usize;
        let bytes_at = s + HEADER;
        let targets_at = bytes_at + ntrans.div_ceil(4);
        for i in 0..ntrans {
            let b = (self.repr[bytes_at + i / 4] >> (8 * (i % 4))) as u8;
            if b == byte {
                return self.repr[targets_at + i];
            }
        }
        FAIL
    }
}

impl Automaton for NFA {
    #[inline]
    fn start_state(&self) -> StateID {
        self.start
    }

    #[inline]
    fn next_state(&self, mut sid: StateID, byte: u8) -> StateID {
        loop {
            let next = self.follow(sid, byte);
            if next != FAIL {
                return next;
            }
            sid = self.repr[sid as usize + 1];
        }
    }

    #[inline]
    fn is_dead(&self, sid: StateID) -> bool {
        sid == self.dead
    }

    #[inline]
    fn match_len(&self, sid: StateID) -> usize {
        self.repr[sid as usize + 3] as usize
    }

    #[inline]
    fn match_pattern(&self, sid: StateID, index: usize) -> PatternID {
        self.matches[self.repr[sid as usize + 2] as usize + index]
    }

    fn memory_usage(&self) -> usize {
        self.repr.capacity() * std::mem::size_of::<u32>()
            + self.matches.capacity() * std::mem::size_of::<PatternID>()
    }
}
