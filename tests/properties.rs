// properties.rs - Randomized comparison against a brute-force matcher.
//
// Inputs are folded onto a four-letter alphabet so that random patterns
// actually occur in random haystacks.

use corasick::prelude::*;
use quickcheck::{quickcheck, TestResult};

type Triple = (PatternID, usize, usize);

fn fold(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b'a' + b % 4).collect()
}

fn inputs(patterns: Vec<Vec<u8>>, haystack: Vec<u8>) -> Option<(Vec<Vec<u8>>, Vec<u8>)> {
    let patterns: Vec<Vec<u8>> = patterns
        .iter()
        .filter(|p| !p.is_empty())
        .take(8)
        .map(|p| fold(&p[..p.len().min(5)]))
        .collect();
    if patterns.is_empty() {
        return None;
    }
    let haystack = fold(&haystack[..haystack.len().min(64)]);
    Some((patterns, haystack))
}

/// Every `(pattern, start, end)` with `start >= at`.
fn occurrences(patterns: &[Vec<u8>], haystack: &[u8], at: usize) -> Vec<Triple> {
    let mut out = Vec::new();
    for (pid, p) in patterns.iter().enumerate() {
        for start in at..haystack.len() {
            if haystack[start..].starts_with(p) {
                out.push((pid, start, start + p.len()));
            }
        }
    }
    out
}

/// Each pattern ending at each offset, longest first, ties by index.
fn naive_overlapping(patterns: &[Vec<u8>], haystack: &[u8]) -> Vec<Triple> {
    let mut all = occurrences(patterns, haystack, 0);
    all.sort_by_key(|&(pid, start, end)| (end, start, pid));
    all
}

fn naive_non_overlapping(kind: MatchKind, patterns: &[Vec<u8>], haystack: &[u8]) -> Vec<Triple> {
    let mut out = Vec::new();
    let mut at = 0;
    loop {
        let candidates = occurrences(patterns, haystack, at);
        let best = match kind {
            // Earliest end, then the longest pattern ending there.
            MatchKind::Standard => candidates.into_iter().min_by_key(|&(pid, s, e)| (e, s, pid)),
            MatchKind::LeftmostFirst => candidates.into_iter().min_by_key(|&(pid, s, _)| (s, pid)),
            MatchKind::LeftmostLongest => candidates
                .into_iter()
                .min_by_key(|&(pid, s, e)| (s, std::cmp::Reverse(e), pid)),
        };
        match best {
            Some(m) => {
                out.push(m);
                at = m.2;
            }
            None => return out,
        }
    }
}

fn check_kind(kind: MatchKind, patterns: Vec<Vec<u8>>, haystack: Vec<u8>) -> TestResult {
    let (patterns, haystack) = match inputs(patterns, haystack) {
        Some(v) => v,
        None => return TestResult::discard(),
    };
    let expected = naive_non_overlapping(kind, &patterns, &haystack);
    for implementation in [
        Implementation::NoncontiguousNFA,
        Implementation::ContiguousNFA,
        Implementation::DFA,
    ] {
        for prefilter in [true, false] {
            let ac = AhoCorasick::builder()
                .match_kind(kind)
                .implementation(Some(implementation))
                .prefilter(prefilter)
                .build(&patterns)
                .unwrap();
            let got = ac.find_matches_as_indexes(&haystack, false).unwrap();
            if got != expected {
                return TestResult::error(format!(
                    "{} {}: patterns {:?}, haystack {:?}: got {:?}, expected {:?}",
                    kind, implementation, patterns, haystack, got, expected
                ));
            }
        }
    }
    TestResult::passed()
}

quickcheck! {
    fn standard_matches_brute_force(patterns: Vec<Vec<u8>>, haystack: Vec<u8>) -> TestResult {
        check_kind(MatchKind::Standard, patterns, haystack)
    }

    fn leftmost_first_matches_brute_force(patterns: Vec<Vec<u8>>, haystack: Vec<u8>) -> TestResult {
        check_kind(MatchKind::LeftmostFirst, patterns, haystack)
    }

    fn leftmost_longest_matches_brute_force(
        patterns: Vec<Vec<u8>>,
        haystack: Vec<u8>
    ) -> TestResult {
        check_kind(MatchKind::LeftmostLongest, patterns, haystack)
    }

    fn overlapping_matches_brute_force(patterns: Vec<Vec<u8>>, haystack: Vec<u8>) -> TestResult {
        let (patterns, haystack) = match inputs(patterns, haystack) {
            Some(v) => v,
            None => return TestResult::discard(),
        };
        let expected = naive_overlapping(&patterns, &haystack);
        let ac = AhoCorasick::new(&patterns).unwrap();
        TestResult::from_bool(ac.find_matches_as_indexes(&haystack, true).unwrap() == expected)
    }

    fn inserted_pattern_is_found(prefix: Vec<u8>, pattern: Vec<u8>, suffix: Vec<u8>) -> TestResult {
        if pattern.is_empty() {
            return TestResult::discard();
        }
        let pattern = fold(&pattern[..pattern.len().min(5)]);
        let prefix = fold(&prefix);
        let mut haystack = prefix.clone();
        haystack.extend_from_slice(&pattern);
        haystack.extend_from_slice(&fold(&suffix));
        for kind in [MatchKind::Standard, MatchKind::LeftmostFirst, MatchKind::LeftmostLongest] {
            let ac = AhoCorasick::builder().match_kind(kind).build([&pattern]).unwrap();
            match ac.find(&haystack) {
                Some(m) if m.start() <= prefix.len() && haystack[m.range()] == pattern[..] => {}
                other => return TestResult::error(format!("{}: {:?}", kind, other)),
            }
        }
        TestResult::passed()
    }

    fn batch_agrees_with_single(haystacks: Vec<Vec<u8>>) -> bool {
        let ac = AhoCorasick::new(["ab", "bca", "c"]).unwrap();
        let haystacks: Vec<Vec<u8>> = haystacks.iter().map(|h| fold(h)).collect();
        let single: Vec<Vec<Triple>> = haystacks
            .iter()
            .map(|h| ac.find_matches_as_indexes(h, true).unwrap())
            .collect();
        ac.par_map_to_indexes(&haystacks, true).unwrap() == single
    }
}
