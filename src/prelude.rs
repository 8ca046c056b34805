// prelude.rs - Convenient re-exports for the public API.
//
//! # Prelude
//!
//! ```
//! use corasick::prelude::*;
//!
//! let ac = AhoCorasick::new(["he", "she"]).unwrap();
//! let ends: Vec<usize> = ac.find_iter("she sells").map(|m| m.end()).collect();
//! assert_eq!(ends, vec![3]);
//! ```

pub use crate::api::{AhoCorasick, AhoCorasickBuilder, FindIter, FindOverlappingIter, Match};
pub use crate::error::MatchError;
pub use crate::options::{Implementation, MatchKind};
pub use crate::patterns::{PatternID, Patterns};
