//! # Corasick
//!
//! Multi-pattern byte and string search built on the Aho-Corasick algorithm,
//! with [`memchr`](https://crates.io/crates/memchr)-accelerated skipping and
//! [`rayon`](https://crates.io/crates/rayon)-backed batch search.
//!
//! An automaton is built once from a list of literal patterns and then finds
//! every occurrence of any of them in a haystack in a single left-to-right
//! pass. Three match kinds decide which match wins when several start or end
//! at the same place.
//!
//! ## Quick Start
//!
//! ```rust
//! use corasick::prelude::*;
//!
//! let ac = AhoCorasick::new(["apple", "maple", "snapple"]).unwrap();
//! let m = ac.find("Nobody likes maple in their apple flavored Snapple.").unwrap();
//! assert_eq!((m.pattern(), m.start(), m.end()), (1, 13, 18));
//! ```
//!
//! For fine-grained control, use [`AhoCorasickBuilder`](api::AhoCorasickBuilder):
//!
//! ```rust
//! use corasick::prelude::*;
//!
//! let patterns = ["content", "disco", "disc", "discontent", "winter"];
//! let haystack = "This is the winter of my discontent";
//!
//! let ac = AhoCorasick::builder()
//!     .match_kind(MatchKind::LeftmostFirst)
//!     .build(patterns)
//!     .unwrap();
//! assert_eq!(
//!     ac.find_matches_as_strings(haystack, false).unwrap(),
//!     vec!["winter", "disco"]
//! );
//!
//! // Overlapping search is only defined for the standard match kind.
//! let ac = AhoCorasick::new(patterns).unwrap();
//! assert_eq!(
//!     ac.find_matches_as_indexes(haystack, true).unwrap(),
//!     vec![(4, 12, 18), (2, 25, 29), (1, 25, 30), (3, 25, 35), (0, 28, 35)]
//! );
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | `AhoCorasick`, its builder, `Match` and the iterators |
//! | [`options`] | `MatchKind` and `Implementation` |
//! | [`patterns`] | Pattern ids and the stored pattern list |
//! | [`error`] | `MatchError` |
//! | `trie` | Prefix tree built from the patterns |
//! | `failure` | Breadth-first failure link computation |
//! | `noncontiguous` | Sparse NFA, the base representation |
//! | `contiguous` | Same NFA flattened into one table |
//! | `dfa` | Full transition table, failure links resolved |
//! | `search` | Standard, leftmost and overlapping scan loops |
//! | `prefilter` | `memchr` skipping from the start state |

pub mod api;
mod automaton;
mod contiguous;
mod dfa;
pub mod error;
mod failure;
mod noncontiguous;
pub mod options;
pub mod patterns;
mod prefilter;
pub mod prelude;
mod search;
mod trie;
