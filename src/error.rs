// error.rs - Error type for automaton construction and search.
//
// Every failure is a caller contract violation detected synchronously;
// nothing here is transient or retried.

use std::error::Error;
use std::fmt;

use crate::options::MatchKind;
use crate::patterns::PatternID;

/// Error type for building an automaton and searching with it.
#[derive(Debug)]
pub enum MatchError {
    /// An empty pattern was supplied at construction.
    InvalidPattern {
        /// Index of the offending pattern.
        index: PatternID,
    },
    /// The pattern source failed while it was being consumed.
    ///
    /// The producer's error is carried unchanged and returned by
    /// [`Error::source`].
    MalformedPatternSource(Box<dyn Error + Send + Sync + 'static>),
    /// The requested operation is not defined for this automaton.
    UnsupportedConfiguration {
        /// Match kind the automaton was built with.
        match_kind: MatchKind,
        /// Short description of the rejected operation.
        operation: &'static str,
    },
    /// An option token could not be parsed.
    InvalidConfigurationValue {
        /// Name of the setting being parsed.
        setting: &'static str,
        /// The rejected input.
        value: String,
    },
    /// The requested representation cannot address the required states.
    StateIDOverflow {
        /// Largest identifier the representation supports.
        max: u64,
    },
}

impl MatchError {
    pub(crate) fn overlapping_unsupported(match_kind: MatchKind) -> MatchError {
        MatchError::UnsupportedConfiguration {
            match_kind,
            operation: "overlapping search",
        }
    }

    /// Returns `true` for errors raised while reading the pattern source.
    pub fn is_pattern_source_error(&self) -> bool {
        matches!(self, MatchError::MalformedPatternSource(_))
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidPattern { index } => write!(
                f,
                "you passed in an empty pattern (index {}); empty patterns are not allowed",
                index
            ),
            MatchError::MalformedPatternSource(err) => {
                write!(f, "pattern source failed: {}", err)
            }
            MatchError::UnsupportedConfiguration {
                match_kind,
                operation,
            } => write!(
                f,
                "{} is not supported with match kind {}",
                operation, match_kind
            ),
            MatchError::InvalidConfigurationValue { setting, value } => {
                write!(f, "invalid value {:?} for {}", value, setting)
            }
            MatchError::StateIDOverflow { max } => write!(
                f,
                "automaton needs more states than the representation can address (max id {})",
                max
            ),
        }
    }
}

impl Error for MatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MatchError::MalformedPatternSource(err) => Some(&**err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct SourceFailed;

    impl fmt::Display for SourceFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "source failed")
        }
    }

    impl Error for SourceFailed {}

    #[test]
    fn invalid_pattern_message() {
        let err = MatchError::InvalidPattern { index: 3 };
        assert!(err.to_string().contains("empty pattern"));
        assert!(err.to_string().contains("index 3"));
        assert!(err.source().is_none());
    }

    #[test]
    fn pattern_source_keeps_cause() {
        let err = MatchError::MalformedPatternSource(Box::new(SourceFailed));
        assert!(err.is_pattern_source_error());
        assert_eq!(err.source().unwrap().to_string(), "source failed");
        assert_eq!(err.to_string(), "pattern source failed: source failed");
    }

    #[test]
    fn overlapping_message_names_kind() {
        let err = MatchError::overlapping_unsupported(MatchKind::LeftmostFirst);
        assert_eq!(
            err.to_string(),
            "overlapping search is not supported with match kind LeftmostFirst"
        );
        assert!(!err.is_pattern_source_error());
    }

    #[test]
    fn invalid_value_message() {
        let err = MatchError::InvalidConfigurationValue {
            setting: "match kind",
            value: "shortest".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value \"shortest\" for match kind");
    }

    #[test]
    fn error_trait() {
        let err: Box<dyn Error> = Box::new(MatchError::StateIDOverflow { max: 7 });
        assert!(err.to_string().contains("max id 7"));
    }
}
