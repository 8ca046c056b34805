// prefilter.rs - memchr-based skipping while a search sits at START.
//
// From START, a byte that is not the first byte of some pattern leads back
// to START, so those bytes can be jumped over wholesale. This only pays off
// when there are very few such bytes.

use memchr::{memchr, memchr2, memchr3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefilter {
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
}

impl Prefilter {
    /// Build a prefilter from the bytes leaving START, if there are few
    /// enough of them.
    pub(crate) fn new(start_bytes: &[u8]) -> Option<Prefilter> {
        match *start_bytes {
            [b1] => Some(Prefilter::One(b1)),
            [b1, b2] => Some(Prefilter::Two(b1, b2)),
            [b1, b2, b3] => Some(Prefilter::Three(b1, b2, b3)),
            _ => None,
        }
    }

    /// Position of the next byte at or after `at` that can begin a match,
    /// or `haystack.len()` if there is none.
    #[inline]
    pub(crate) fn next_candidate(&self, haystack: &[u8], at: usize) -> usize {
        let rest = &haystack[at..];
        let found = match *self {
            Prefilter::One(b1) => memchr(b1, rest),
            Prefilter::Two(b1, b2) => memchr2(b1, b2, rest),
            Prefilter::Three(b1, b2, b3) => memchr3(b1, b2, b3, rest),
        };
        match found {
            None => haystack.len(),
            Some(i) => at + i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_only_for_small_sets() {
        assert_eq!(Prefilter::new(b""), None);
        assert_eq!(Prefilter::new(b"a"), Some(Prefilter::One(b'a')));
        assert_eq!(Prefilter::new(b"ab"), Some(Prefilter::Two(b'a', b'b')));
        assert_eq!(
            Prefilter::new(b"abc"),
            Some(Prefilter::Three(b'a', b'b', b'c'))
        );
        assert_eq!(Prefilter::new(b"abcd"), None);
    }

    #[test]
    fn skips_to_candidates() {
        let pre = Prefilter::new(b"xz").unwrap();
        let haystack = b"aaaxbbbz";
        assert_eq!(pre.next_candidate(haystack, 0), 3);
        assert_eq!(pre.next_candidate(haystack, 3), 3);
        assert_eq!(pre.next_candidate(haystack, 4), 7);
        assert_eq!(pre.next_candidate(b"aaaa", 1), 4);
        assert_eq!(pre.next_candidate(haystack, haystack.len()), haystack.len());
    }
}
