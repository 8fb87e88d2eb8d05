use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("invalid anchor pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("anchor {pattern:?} matches no line")]
    NotFound { pattern: String },
    #[error("anchor {pattern:?} matches more than one line: {lines:?}")]
    Ambiguous { pattern: String, lines: Vec<usize> },
}

/// A pattern that must identify exactly one line of a document.
#[derive(Debug, Clone)]
pub struct Anchor {
    regex: Regex,
}

impl Anchor {
    pub fn new(pattern: &str) -> Result<Self, AnchorError> {
        let regex = Regex::new(pattern).map_err(|e| AnchorError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Zero-based index of the single matching line.
    ///
    /// Line terminators are stripped before matching so `$` anchors at the
    /// end of the visible text.
    pub fn locate<S: AsRef<str>>(&self, document: &[S]) -> Result<usize, AnchorError> {
        let matches: Vec<usize> = document
            .iter()
            .enumerate()
            .filter(|(_, line)| self.regex.is_match(strip_terminator(line.as_ref())))
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [] => Err(AnchorError::NotFound {
                pattern: self.pattern().to_string(),
            }),
            [index] => {
                debug!(pattern = self.pattern(), line = index + 1, "anchor located");
                Ok(*index)
            }
            _ => Err(AnchorError::Ambiguous {
                pattern: self.pattern().to_string(),
                lines: matches.iter().map(|index| index + 1).collect(),
            }),
        }
    }
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
