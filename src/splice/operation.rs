use std::fmt::Display;

use thiserror::Error;

/// One step of a splice.
///
/// Lines the caller wants removed are never named: they are whatever no
/// `KeepRange` covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Emit `document[start..end]` verbatim. Zero-based, half-open.
    KeepRange { start: usize, end: usize },
    /// Emit caller-supplied content verbatim.
    Insert(String),
}

impl Operation {
    pub fn keep(start: usize, end: usize) -> Self {
        Operation::KeepRange { start, end }
    }

    pub fn insert(content: impl Into<String>) -> Self {
        Operation::Insert(content.into())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::KeepRange { start, end } => write!(f, "keep [{start}, {end})"),
            Operation::Insert(content) => write!(f, "insert {} bytes", content.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    #[error("keep range [{start}, {end}) is out of range for a document of {len} lines")]
    OutOfRange { start: i64, end: i64, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::keep(0, 3).to_string(), "keep [0, 3)");
        assert_eq!(Operation::insert("NEW\n").to_string(), "insert 4 bytes");
    }

    #[test]
    fn test_out_of_range_message_names_the_range() {
        let err = SpliceError::OutOfRange {
            start: -1,
            end: 5,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "keep range [-1, 5) is out of range for a document of 10 lines"
        );
    }
}
