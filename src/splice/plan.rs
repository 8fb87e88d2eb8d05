//! Edit plans: the JSON description of one splice.
//!
//! A plan names its boundaries the way a person reading the file would
//! (indices, displayed line numbers, or unique marker lines) and is resolved
//! against a concrete document into the [`Operation`] list the core consumes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::splice::anchor::{Anchor, AnchorError};
use crate::splice::boundary::{self, BoundaryError};
use crate::splice::engine::{checked_range, to_signed};
use crate::splice::operation::{Operation, SpliceError};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to read plan {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse plan {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to read fragment {}: {source}", path.display())]
    Fragment {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("plan has no operations")]
    Empty,
    #[error(transparent)]
    Anchor(#[from] AnchorError),
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// Marker for the `"eof"` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eof {
    Eof,
}

/// Displayed line number. As a start it is the first kept line, as an end
/// the last kept line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineBound {
    pub line: usize,
}

/// The single line matching `anchor`, shifted by `offset` lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorBound {
    pub anchor: String,
    #[serde(default)]
    pub offset: i64,
}

/// One end of a keep range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    /// Zero-based index, used as is.
    Index(i64),
    Line(LineBound),
    Anchor(AnchorBound),
    /// One past the last line.
    Eof(Eof),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

impl Bound {
    fn resolve<S: AsRef<str>>(&self, side: Side, document: &[S]) -> Result<i64, PlanError> {
        let index = match self {
            Bound::Index(index) => *index,
            Bound::Line(LineBound { line }) => {
                let index = match side {
                    Side::Start => boundary::start_at(*line)?,
                    Side::End => boundary::end_through(*line),
                };
                to_signed(index)
            }
            Bound::Anchor(AnchorBound { anchor, offset }) => {
                let found = Anchor::new(anchor)?.locate(document)?;
                to_signed(found).saturating_add(*offset)
            }
            Bound::Eof(_) => to_signed(document.len()),
        };
        Ok(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    Keep { start: Bound, end: Bound },
    Insert { text: String },
    /// Insert the contents of a file. Relative paths are taken from the
    /// directory the plan was loaded from.
    InsertFile { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub description: Option<String>,
    pub operations: Vec<Step>,
}

impl Plan {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let json = fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| PlanError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Turns the plan into concrete operations for `document`.
    ///
    /// Every keep is bounds-checked here so a bad plan is reported before the
    /// document is touched.
    pub fn resolve<S: AsRef<str>>(
        &self,
        document: &[S],
        base_dir: &Path,
    ) -> Result<Vec<Operation>, PlanError> {
        if self.operations.is_empty() {
            return Err(PlanError::Empty);
        }

        let mut operations = Vec::with_capacity(self.operations.len());
        for step in &self.operations {
            let operation = match step {
                Step::Keep { start, end } => {
                    let start = start.resolve(Side::Start, document)?;
                    let end = end.resolve(Side::End, document)?;
                    let range = checked_range(start, end, document.len())?;
                    Operation::keep(range.start, range.end)
                }
                Step::Insert { text } => Operation::insert(text.as_str()),
                Step::InsertFile { path } => {
                    let path = base_dir.join(path);
                    let content = fs::read_to_string(&path)
                        .map_err(|source| PlanError::Fragment { path, source })?;
                    Operation::Insert(content)
                }
            };
            debug!(%operation, "resolved plan step");
            operations.push(operation);
        }
        Ok(operations)
    }
}
