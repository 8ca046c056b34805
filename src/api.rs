// api.rs - Public API for building an automaton and searching with it.
//
// Wraps the internals (trie, failure links, representations, search loops)
// with Rust-native types: AhoCorasick, AhoCorasickBuilder, Match, FindIter
// and FindOverlappingIter.

use std::convert::Infallible;
use std::error::Error;
use std::ops::Range;

use rayon::prelude::*;

use crate::automaton::{Automaton, Repr};
use crate::contiguous;
use crate::dfa;
use crate::error::MatchError;
use crate::noncontiguous;
use crate::options::{Implementation, MatchKind};
use crate::patterns::{PatternID, PatternTable, PatternTableBuilder, Patterns};
use crate::prefilter::Prefilter;
use crate::search::{self, OverlappingState};
use crate::trie::TrieBuilder;

/// Automatic selection builds a DFA for at most this many patterns...
const DFA_AUTO_PATTERN_LIMIT: usize = 100;
/// ...as long as the table stays below this many states (about 16 MiB).
const DFA_AUTO_STATE_LIMIT: usize = 16 * 1024;

/// A compiled Aho-Corasick automaton.
///
/// Immutable once built: any number of threads may search with the same
/// automaton at the same time.
///
/// # Examples
///
/// ```
/// use corasick::api::AhoCorasick;
///
/// let ac = AhoCorasick::new(["hello", "world"]).unwrap();
/// let found = ac.find_matches_as_indexes("hello, world, hello again", false).unwrap();
/// assert_eq!(found, vec![(0, 0, 5), (1, 7, 12), (0, 14, 19)]);
/// ```
#[derive(Clone)]
pub struct AhoCorasick {
    repr: Repr,
    patterns: PatternTable,
    match_kind: MatchKind,
    prefilter: Option<Prefilter>,
}

impl AhoCorasick {
    /// Build an automaton with default options (standard match kind,
    /// automatic representation and pattern storage).
    pub fn new<I, P>(patterns: I) -> Result<AhoCorasick, MatchError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        AhoCorasickBuilder::new().build(patterns)
    }

    /// Create an [`AhoCorasickBuilder`] for fine-grained control over
    /// construction.
    pub fn builder() -> AhoCorasickBuilder {
        AhoCorasickBuilder::new()
    }

    /// Match kind this automaton was built with.
    pub fn match_kind(&self) -> MatchKind {
        self.match_kind
    }

    /// Representation chosen at construction time.
    pub fn implementation(&self) -> Implementation {
        self.repr.implementation()
    }

    /// Number of patterns, including any that can never be reported.
    pub fn patterns_len(&self) -> usize {
        self.patterns.len()
    }

    /// Length in bytes of the longest pattern.
    pub fn max_pattern_len(&self) -> usize {
        self.patterns.max_len()
    }

    /// Whether the pattern bytes were kept after construction.
    pub fn stores_patterns(&self) -> bool {
        self.patterns.is_stored()
    }

    /// Bytes of pattern `pid`, if patterns are stored and `pid` exists.
    pub fn pattern(&self, pid: PatternID) -> Option<&[u8]> {
        self.patterns.get(pid)
    }

    /// All patterns in index order, if patterns are stored.
    pub fn patterns(&self) -> Option<Patterns<'_>> {
        self.patterns.iter()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.repr.memory_usage() + self.patterns.memory_usage()
    }

    /// Check whether any pattern occurs in `haystack`.
    pub fn is_match<H: AsRef<[u8]> + ?Sized>(&self, haystack: &H) -> bool {
        self.find(haystack).is_some()
    }

    /// Return the first match in `haystack` according to the match kind.
    pub fn find<H: AsRef<[u8]> + ?Sized>(&self, haystack: &H) -> Option<Match> {
        self.find_at(haystack.as_ref(), 0)
    }

    /// Iterate over all non-overlapping matches in `haystack`.
    ///
    /// Available for every match kind.
    pub fn find_iter<'a, 'h, H: AsRef<[u8]> + ?Sized>(
        &'a self,
        haystack: &'h H,
    ) -> FindIter<'a, 'h> {
        FindIter {
            ac: self,
            haystack: haystack.as_ref(),
            at: 0,
        }
    }

    /// Iterate over all matches in `haystack`, including overlapping ones.
    ///
    /// Fails with [`MatchError::UnsupportedConfiguration`] unless the
    /// automaton uses [`MatchKind::Standard`].
    ///
    /// # Examples
    ///
    /// ```
    /// use corasick::api::AhoCorasick;
    ///
    /// let ac = AhoCorasick::new(["he", "she", "hers"]).unwrap();
    /// let ends: Vec<usize> = ac
    ///     .try_find_overlapping_iter("ushers")
    ///     .unwrap()
    ///     .map(|m| m.end())
    ///     .collect();
    /// assert_eq!(ends, vec![4, 4, 6]);
    /// ```
    pub fn try_find_overlapping_iter<'a, 'h, H: AsRef<[u8]> + ?Sized>(
        &'a self,
        haystack: &'h H,
    ) -> Result<FindOverlappingIter<'a, 'h>, MatchError> {
        self.check_overlapping(true)?;
        Ok(FindOverlappingIter {
            ac: self,
            haystack: haystack.as_ref(),
            state: OverlappingState::default(),
        })
    }

    /// Return all matches as `(pattern, start, end)` triples.
    pub fn find_matches_as_indexes<H: AsRef<[u8]> + ?Sized>(
        &self,
        haystack: &H,
        overlapping: bool,
    ) -> Result<Vec<(PatternID, usize, usize)>, MatchError> {
        self.check_overlapping(overlapping)?;
        Ok(self.collect_indexes(haystack.as_ref(), overlapping))
    }

    /// Return the matched bytes of every match, sliced from `haystack`.
    pub fn find_matches_as_bytes<'h, H: AsRef<[u8]> + ?Sized>(
        &self,
        haystack: &'h H,
        overlapping: bool,
    ) -> Result<Vec<&'h [u8]>, MatchError> {
        self.check_overlapping(overlapping)?;
        let haystack = haystack.as_ref();
        Ok(self
            .collect_indexes(haystack, overlapping)
            .into_iter()
            .map(|(_, start, end)| &haystack[start..end])
            .collect())
    }

    /// Return the matched text of every match, sliced from `haystack`.
    ///
    /// Fails with [`MatchError::UnsupportedConfiguration`] if some pattern is
    /// not valid UTF-8, since its matches could split a character.
    ///
    /// # Examples
    ///
    /// ```
    /// use corasick::api::AhoCorasick;
    /// use corasick::options::MatchKind;
    ///
    /// let patterns = ["content", "disco", "disc", "discontent", "winter"];
    /// let ac = AhoCorasick::builder()
    ///     .match_kind(MatchKind::LeftmostLongest)
    ///     .build(patterns)
    ///     .unwrap();
    /// let found = ac
    ///     .find_matches_as_strings("This is the winter of my discontent", false)
    ///     .unwrap();
    /// assert_eq!(found, vec!["winter", "discontent"]);
    /// ```
    pub fn find_matches_as_strings<'h>(
        &self,
        haystack: &'h str,
        overlapping: bool,
    ) -> Result<Vec<&'h str>, MatchError> {
        self.check_overlapping(overlapping)?;
        self.check_strings()?;
        Ok(self.collect_strings(haystack, overlapping))
    }

    /// Run [`find_matches_as_indexes`](Self::find_matches_as_indexes) over
    /// every haystack, in order.
    pub fn map_to_indexes<H: AsRef<[u8]>>(
        &self,
        haystacks: &[H],
        overlapping: bool,
    ) -> Result<Vec<Vec<(PatternID, usize, usize)>>, MatchError> {
        self.check_overlapping(overlapping)?;
        Ok(haystacks
            .iter()
            .map(|h| self.collect_indexes(h.as_ref(), overlapping))
            .collect())
    }

    /// Like [`map_to_indexes`](Self::map_to_indexes), with the haystacks
    /// spread over rayon's thread pool. Output order matches input order.
    pub fn par_map_to_indexes<H: AsRef<[u8]> + Sync>(
        &self,
        haystacks: &[H],
        overlapping: bool,
    ) -> Result<Vec<Vec<(PatternID, usize, usize)>>, MatchError> {
        self.check_overlapping(overlapping)?;
        Ok(haystacks
            .par_iter()
            .map(|h| self.collect_indexes(h.as_ref(), overlapping))
            .collect())
    }

    /// Run [`find_matches_as_strings`](Self::find_matches_as_strings) over
    /// every haystack, in order.
    pub fn map_to_strings<'h, S: AsRef<str>>(
        &self,
        haystacks: &'h [S],
        overlapping: bool,
    ) -> Result<Vec<Vec<&'h str>>, MatchError> {
        self.check_overlapping(overlapping)?;
        self.check_strings()?;
        Ok(haystacks
            .iter()
            .map(|h| self.collect_strings(h.as_ref(), overlapping))
            .collect())
    }

    /// Like [`map_to_strings`](Self::map_to_strings), with the haystacks
    /// spread over rayon's thread pool. Output order matches input order.
    pub fn par_map_to_strings<'h, S: AsRef<str> + Sync>(
        &self,
        haystacks: &'h [S],
        overlapping: bool,
    ) -> Result<Vec<Vec<&'h str>>, MatchError> {
        self.check_overlapping(overlapping)?;
        self.check_strings()?;
        Ok(haystacks
            .par_iter()
            .map(|h| self.collect_strings(h.as_ref(), overlapping))
            .collect())
    }

    fn check_overlapping(&self, overlapping: bool) -> Result<(), MatchError> {
        if overlapping && self.match_kind.is_leftmost() {
            return Err(MatchError::overlapping_unsupported(self.match_kind));
        }
        Ok(())
    }

    fn check_strings(&self) -> Result<(), MatchError> {
        if !self.patterns.all_utf8() {
            return Err(MatchError::UnsupportedConfiguration {
                match_kind: self.match_kind,
                operation: "string search with non-UTF-8 patterns",
            });
        }
        Ok(())
    }

    /// Callers have already run `check_overlapping`.
    fn collect_indexes(
        &self,
        haystack: &[u8],
        overlapping: bool,
    ) -> Vec<(PatternID, usize, usize)> {
        if overlapping {
            let it = FindOverlappingIter {
                ac: self,
                haystack,
                state: OverlappingState::default(),
            };
            it.map(Match::as_tuple).collect()
        } else {
            self.find_iter(haystack).map(Match::as_tuple).collect()
        }
    }

    /// Callers have already run `check_overlapping` and `check_strings`.
    fn collect_strings<'h>(&self, haystack: &'h str, overlapping: bool) -> Vec<&'h str> {
        self.collect_indexes(haystack.as_bytes(), overlapping)
            .into_iter()
            .map(|(_, start, end)| &haystack[start..end])
            .collect()
    }

    fn find_at(&self, haystack: &[u8], at: usize) -> Option<Match> {
        match &self.repr {
            Repr::Noncontiguous(nfa) => self.find_at_with(nfa, haystack, at),
            Repr::Contiguous(nfa) => self.find_at_with(nfa, haystack, at),
            Repr::Dfa(dfa) => self.find_at_with(dfa, haystack, at),
        }
    }

    #[inline]
    fn find_at_with<A: Automaton>(&self, aut: &A, haystack: &[u8], at: usize) -> Option<Match> {
        if self.match_kind.is_leftmost() {
            search::find_leftmost(aut, &self.patterns, self.prefilter, haystack, at)
        } else {
            search::find_standard(aut, &self.patterns, self.prefilter, haystack, at)
        }
    }
}

impl std::fmt::Debug for AhoCorasick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AhoCorasick")
            .field("match_kind", &self.match_kind)
            .field("implementation", &self.implementation())
            .field("patterns_len", &self.patterns_len())
            .finish_non_exhaustive()
    }
}

// === AhoCorasickBuilder ===

/// Builder for an [`AhoCorasick`] automaton with custom options.
///
/// # Examples
///
/// ```
/// use corasick::api::AhoCorasick;
/// use corasick::options::{Implementation, MatchKind};
///
/// let ac = AhoCorasick::builder()
///     .match_kind(MatchKind::LeftmostFirst)
///     .implementation(Some(Implementation::ContiguousNFA))
///     .store_patterns(Some(false))
///     .build(["samwise", "sam"])
///     .unwrap();
/// assert_eq!(ac.implementation(), Implementation::ContiguousNFA);
/// assert_eq!(ac.find("samwise").unwrap().pattern(), 0);
/// assert!(ac.pattern(0).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AhoCorasickBuilder {
    match_kind: MatchKind,
    implementation: Option<Implementation>,
    store_patterns: Option<bool>,
    prefilter: bool,
}

impl Default for AhoCorasickBuilder {
    fn default() -> Self {
        AhoCorasickBuilder {
            match_kind: MatchKind::default(),
            implementation: None,
            store_patterns: None,
            prefilter: true,
        }
    }
}

impl AhoCorasickBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the match kind (default: [`MatchKind::Standard`]).
    pub fn match_kind(mut self, kind: MatchKind) -> Self {
        self.match_kind = kind;
        self
    }

    /// Select the representation, or `None` to choose by pattern set size.
    pub fn implementation(mut self, implementation: Option<Implementation>) -> Self {
        self.implementation = implementation;
        self
    }

    /// Keep (`Some(true)`) or discard (`Some(false)`) the pattern bytes after
    /// construction. `None` keeps them while their total size is small.
    pub fn store_patterns(mut self, store: Option<bool>) -> Self {
        self.store_patterns = store;
        self
    }

    /// Enable or disable the `memchr` prefilter. Matches are the same either
    /// way.
    pub fn prefilter(mut self, yes: bool) -> Self {
        self.prefilter = yes;
        self
    }

    /// Build an automaton from `patterns`, consuming the iterator once.
    ///
    /// Fails with [`MatchError::InvalidPattern`] if a pattern is empty.
    pub fn build<I, P>(&self, patterns: I) -> Result<AhoCorasick, MatchError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.try_build(patterns.into_iter().map(Ok::<P, Infallible>))
    }

    /// Build an automaton from a fallible pattern source.
    ///
    /// The first error the source yields aborts construction and is returned
    /// unchanged inside [`MatchError::MalformedPatternSource`].
    ///
    /// # Examples
    ///
    /// ```
    /// use corasick::api::AhoCorasickBuilder;
    /// use corasick::error::MatchError;
    ///
    /// let lines = vec![Ok("foo"), Err(std::io::Error::other("disk on fire"))];
    /// let err = AhoCorasickBuilder::new().try_build(lines).unwrap_err();
    /// assert!(matches!(err, MatchError::MalformedPatternSource(_)));
    /// ```
    pub fn try_build<I, P, E>(&self, patterns: I) -> Result<AhoCorasick, MatchError>
    where
        I: IntoIterator<Item = Result<P, E>>,
        P: AsRef<[u8]>,
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        let mut trie = TrieBuilder::new(self.match_kind);
        let mut table = PatternTableBuilder::new(self.store_patterns);
        for pattern in patterns {
            let pattern = pattern.map_err(|err| MatchError::MalformedPatternSource(err.into()))?;
            let pattern = pattern.as_ref();
            let pid = table.push(pattern);
            trie.add(pid, pattern)?;
        }
        let patterns = table.finish();
        let nfa = noncontiguous::NFA::new(trie.finish());
        let prefilter = if self.prefilter {
            Prefilter::new(&nfa.start_bytes())
        } else {
            None
        };
        let repr = self.compile(nfa, &patterns)?;

        let ac = AhoCorasick {
            repr,
            patterns,
            match_kind: self.match_kind,
            prefilter,
        };
        log::debug!(
            "built {} automaton: {} patterns, {} states, match kind {}, prefilter {:?}, {} bytes",
            ac.implementation(),
            ac.patterns_len(),
            ac.repr.state_len(),
            ac.match_kind,
            ac.prefilter,
            ac.memory_usage()
        );
        Ok(ac)
    }

    fn compile(
        &self,
        nfa: noncontiguous::NFA,
        patterns: &PatternTable,
    ) -> Result<Repr, MatchError> {
        match self.implementation {
            Some(Implementation::NoncontiguousNFA) => Ok(Repr::Noncontiguous(nfa)),
            Some(Implementation::ContiguousNFA) => {
                Ok(Repr::Contiguous(contiguous::NFA::new(&nfa)?))
            }
            Some(Implementation::DFA) => Ok(Repr::Dfa(dfa::DFA::new(&nfa)?)),
            None => {
                let states = nfa.states().len();
                if patterns.len() <= DFA_AUTO_PATTERN_LIMIT && states <= DFA_AUTO_STATE_LIMIT {
                    log::trace!("{} patterns, {} states: choosing DFA", patterns.len(), states);
                    return Ok(Repr::Dfa(dfa::DFA::new(&nfa)?));
                }
                match contiguous::NFA::new(&nfa) {
                    Ok(cnfa) => {
                        log::trace!(
                            "{} patterns, {} states: choosing contiguous NFA",
                            patterns.len(),
                            states
                        );
                        Ok(Repr::Contiguous(cnfa))
                    }
                    Err(err) => {
                        log::trace!(
                            "contiguous NFA unavailable ({}), keeping noncontiguous NFA",
                            err
                        );
                        Ok(Repr::Noncontiguous(nfa))
                    }
                }
            }
        }
    }
}

// === Match ===

/// A single match: which pattern, and where in the haystack.
///
/// Offsets are byte offsets; `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pattern: PatternID,
    start: usize,
    end: usize,
}

impl Match {
    pub(crate) fn new(pattern: PatternID, start: usize, end: usize) -> Match {
        debug_assert!(start < end);
        Match {
            pattern,
            start,
            end,
        }
    }

    /// Index of the matched pattern.
    pub fn pattern(&self) -> PatternID {
        self.pattern
    }

    /// Byte offset of the start of the match.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the end of the match (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range of the match.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the match in bytes, equal to the pattern's length.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`: empty patterns are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The match as a `(pattern, start, end)` triple.
    pub fn as_tuple(self) -> (PatternID, usize, usize) {
        (self.pattern, self.start, self.end)
    }
}

impl From<Match> for (PatternID, usize, usize) {
    fn from(m: Match) -> Self {
        m.as_tuple()
    }
}

// === FindIter ===

/// Iterator over all non-overlapping matches in a haystack.
#[derive(Debug)]
pub struct FindIter<'a, 'h> {
    ac: &'a AhoCorasick,
    haystack: &'h [u8],
    at: usize,
}

impl Iterator for FindIter<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let m = self.ac.find_at(self.haystack, self.at)?;
        // Patterns are never empty, so every match moves the cursor forward.
        self.at = m.end();
        Some(m)
    }
}

impl std::iter::FusedIterator for FindIter<'_, '_> {}

// === FindOverlappingIter ===

/// Iterator over all matches in a haystack, overlapping ones included.
#[derive(Debug)]
pub struct FindOverlappingIter<'a, 'h> {
    ac: &'a AhoCorasick,
    haystack: &'h [u8],
    state: OverlappingState,
}

impl Iterator for FindOverlappingIter<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let ac = self.ac;
        match &ac.repr {
            Repr::Noncontiguous(nfa) => search::find_overlapping(
                nfa,
                &ac.patterns,
                ac.prefilter,
                self.haystack,
                &mut self.state,
            ),
            Repr::Contiguous(nfa) => search::find_overlapping(
                nfa,
                &ac.patterns,
                ac.prefilter,
                self.haystack,
                &mut self.state,
            ),
            Repr::Dfa(dfa) => search::find_overlapping(
                dfa,
                &ac.patterns,
                ac.prefilter,
                self.haystack,
                &mut self.state,
            ),
        }
    }
}

impl std::iter::FusedIterator for FindOverlappingIter<'_, '_> {}
