// Criterion benchmark suite: construction and search per representation.
//
// Run: cargo bench
// Specific group: cargo bench -- search
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use corasick::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const IMPLS: [(&str, Implementation); 3] = [
    ("noncontiguous", Implementation::NoncontiguousNFA),
    ("contiguous", Implementation::ContiguousNFA),
    ("dfa", Implementation::DFA),
];

const WORDS: &[&str] = &[
    "Sherlock", "Holmes", "Watson", "Moriarty", "Lestrade", "Hudson", "Baker", "Street",
    "detective", "mystery", "London", "inspector", "evidence", "deduction", "violin",
];

fn build(kind: MatchKind, implementation: Implementation, patterns: &[String]) -> AhoCorasick {
    AhoCorasick::builder()
        .match_kind(kind)
        .implementation(Some(implementation))
        .build(patterns)
        .expect("build failed")
}

fn word_patterns() -> Vec<String> {
    WORDS.iter().map(|w| w.to_string()).collect()
}

fn many_patterns(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{:04}", WORDS[i % WORDS.len()], i)).collect()
}

fn prose(len: usize) -> String {
    let filler = "It was a dark and foggy night when Sherlock Holmes received a letter \
                  from Inspector Lestrade about a mystery on Baker Street. ";
    filler.repeat(len / filler.len() + 1)[..len].to_string()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let sets = [("words", word_patterns()), ("1000", many_patterns(1000))];

    let mut group = c.benchmark_group("build");
    for (set, patterns) in &sets {
        for (name, implementation) in IMPLS {
            group.bench_with_input(BenchmarkId::new(name, set), patterns, |b, patterns| {
                b.iter(|| build(MatchKind::Standard, implementation, black_box(patterns)))
            });
        }
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn bench_search(c: &mut Criterion) {
    let patterns = word_patterns();
    let texts = [("short", prose(200)), ("long", prose(64 * 1024))];

    let mut group = c.benchmark_group("search");
    for (size, text) in &texts {
        group.throughput(Throughput::Bytes(text.len() as u64));
        for kind in [MatchKind::Standard, MatchKind::LeftmostLongest] {
            for (name, implementation) in IMPLS {
                let ac = build(kind, implementation, &patterns);
                let id = BenchmarkId::new(format!("{}/{}", name, kind), size);
                group.bench_with_input(id, &text[..], |b, text| {
                    b.iter(|| ac.find_matches_as_indexes(black_box(text), false).unwrap())
                });
            }
        }
    }
    group.finish();
}

fn bench_overlapping(c: &mut Criterion) {
    let patterns = word_patterns();
    let text = prose(64 * 1024);

    let mut group = c.benchmark_group("overlapping");
    group.throughput(Throughput::Bytes(text.len() as u64));
    for (name, implementation) in IMPLS {
        let ac = build(MatchKind::Standard, implementation, &patterns);
        group.bench_with_input(BenchmarkId::new(name, "long"), &text[..], |b, text| {
            b.iter(|| ac.find_matches_as_indexes(black_box(text), true).unwrap())
        });
    }
    group.finish();
}

fn bench_prefilter(c: &mut Criterion) {
    // One start byte, so the memchr skip applies.
    let patterns = vec!["Sherlock".to_string(), "Street".to_string()];
    let text = prose(64 * 1024);

    let mut group = c.benchmark_group("prefilter");
    for enabled in [true, false] {
        let ac = AhoCorasick::builder()
            .prefilter(enabled)
            .build(&patterns)
            .expect("build failed");
        let name = if enabled { "on" } else { "off" };
        group.bench_with_input(BenchmarkId::new(name, "long"), &text[..], |b, text| {
            b.iter(|| ac.find_iter(black_box(text)).count())
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

fn bench_batch(c: &mut Criterion) {
    let ac = AhoCorasick::new(word_patterns()).expect("build failed");
    let haystacks: Vec<String> = (0..2000).map(|i| prose(500 + i % 300)).collect();

    let mut group = c.benchmark_group("batch");
    group.bench_with_input(BenchmarkId::new("sequential", 2000), &haystacks, |b, hs| {
        b.iter(|| ac.map_to_indexes(black_box(hs), false).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("parallel", 2000), &haystacks, |b, hs| {
        b.iter(|| ac.par_map_to_indexes(black_box(hs), false).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_search,
    bench_overlapping,
    bench_prefilter,
    bench_batch
);
criterion_main!(benches);
