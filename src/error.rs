//! Error taxonomy for the merge engine.
//!
//! Unbalanced markers are the only fatal condition: a start marker that never
//! closes, or an end marker with nothing open. Both abort the merge
//! synchronously and carry the offending marker line verbatim so the caller
//! can point the user at the exact spot. A malformed marker name (start token
//! with no closing bracket) is deliberately *not* an error: the line is
//! ordinary content, which avoids false positives on text that merely
//! mentions the marker tokens.

use thiserror::Error;

/// A fatal structural error raised while parsing a marked-up document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A section was opened but never closed before end of input.
    #[error("unterminated section, no matching end marker for: {starting_line}")]
    UnterminatedSection {
        /// The literal start-marker line of the section left open.
        starting_line: String,
    },

    /// An end marker appeared while no section was open.
    #[error("stray end marker, no section open at: {line}")]
    StrayEndMarker {
        /// The literal end-marker line.
        line: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_marker_line() {
        let err = MergeError::UnterminatedSection {
            starting_line: "// SECTION-START[imports]".to_string(),
        };
        assert!(err.to_string().contains("// SECTION-START[imports]"));

        let err = MergeError::StrayEndMarker {
            line: "# SECTION-END".to_string(),
        };
        assert!(err.to_string().contains("# SECTION-END"));
    }
}
