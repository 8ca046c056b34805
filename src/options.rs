// options.rs - Construction-time settings: match kind and representation.

use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// Policy deciding which of the possible matches a search reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchKind {
    /// Report matches as soon as the automaton sees them. The only kind that
    /// supports overlapping search.
    #[default]
    Standard,
    /// Among matches starting at the leftmost position, prefer the pattern
    /// that was supplied first.
    LeftmostFirst,
    /// Among matches starting at the leftmost position, prefer the longest.
    /// Equal lengths go to the pattern that was supplied first.
    LeftmostLongest,
}

impl MatchKind {
    pub(crate) fn is_leftmost(self) -> bool {
        !matches!(self, MatchKind::Standard)
    }

    pub(crate) fn is_leftmost_first(self) -> bool {
        matches!(self, MatchKind::LeftmostFirst)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchKind::Standard => "Standard",
            MatchKind::LeftmostFirst => "LeftmostFirst",
            MatchKind::LeftmostLongest => "LeftmostLongest",
        };
        f.write_str(name)
    }
}

impl FromStr for MatchKind {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<MatchKind, MatchError> {
        match normalize(s).as_str() {
            "standard" => Ok(MatchKind::Standard),
            "leftmostfirst" => Ok(MatchKind::LeftmostFirst),
            "leftmostlongest" => Ok(MatchKind::LeftmostLongest),
            _ => Err(MatchError::InvalidConfigurationValue {
                setting: "match kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Physical encoding of the automaton.
///
/// All three produce identical matches; they differ in memory use and
/// per-byte cost.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Implementation {
    /// Sparse transitions per state, failure links followed at search time.
    NoncontiguousNFA,
    /// The noncontiguous NFA flattened into one table.
    ContiguousNFA,
    /// A full transition table with failure links resolved ahead of time.
    DFA,
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Implementation::NoncontiguousNFA => "NoncontiguousNFA",
            Implementation::ContiguousNFA => "ContiguousNFA",
            Implementation::DFA => "DFA",
        };
        f.write_str(name)
    }
}

impl FromStr for Implementation {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Implementation, MatchError> {
        match normalize(s).as_str() {
            "noncontiguousnfa" => Ok(Implementation::NoncontiguousNFA),
            "contiguousnfa" => Ok(Implementation::ContiguousNFA),
            "dfa" => Ok(Implementation::DFA),
            _ => Err(MatchError::InvalidConfigurationValue {
                setting: "implementation",
                value: s.to_string(),
            }),
        }
    }
}

/// Lowercase and drop `-`/`_` so "leftmost-first" and "LeftmostFirst" agree.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
