use serde::Serialize;
use std::fmt::Display;

use crate::splice::engine::split_lines;
use crate::splice::operation::Operation;

/// Displayed (1-based, inclusive) span of source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub first: usize,
    pub last: usize,
}

impl LineSpan {
    /// Span for the zero-based half-open range `start..end`, if non-empty.
    pub fn from_range(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self {
            first: start + 1,
            last: end,
        })
    }

    pub fn line_count(&self) -> usize {
        self.last + 1 - self.first
    }
}

impl Display for LineSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepSummary {
    Keep {
        #[serde(skip_serializing_if = "Option::is_none")]
        span: Option<LineSpan>,
        lines: usize,
    },
    /// `lines` counts complete (`\n`-terminated) lines. An unterminated
    /// tail is not counted: it joins whatever line follows it.
    Insert {
        lines: usize,
    },
}

impl From<&Operation> for StepSummary {
    fn from(operation: &Operation) -> Self {
        match operation {
            Operation::KeepRange { start, end } => StepSummary::Keep {
                span: LineSpan::from_range(*start, *end),
                lines: end.saturating_sub(*start),
            },
            Operation::Insert(content) => StepSummary::Insert {
                lines: content.matches('\n').count(),
            },
        }
    }
}

/// Number of lines in the text that `result` writes out.
///
/// Differs from `result.len()` when an insert without a trailing newline is
/// followed by more output.
pub fn written_line_count<S: AsRef<str>>(result: &[S]) -> usize {
    let text: String = result.iter().map(AsRef::as_ref).collect();
    split_lines(&text).len()
}

/// What a splice did to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpliceReport {
    pub source_lines: usize,
    pub result_lines: usize,
    pub steps: Vec<StepSummary>,
    /// Source lines no keep covers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<LineSpan>,
    /// Source lines covered by more than one keep.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicated: Vec<LineSpan>,
}

impl SpliceReport {
    pub fn new(source_lines: usize, operations: &[Operation], result_lines: usize) -> Self {
        let mut coverage = vec![0usize; source_lines];
        for operation in operations {
            if let Operation::KeepRange { start, end } = operation {
                if let Some(covered) = coverage.get_mut(*start..*end) {
                    covered.iter_mut().for_each(|count| *count += 1);
                }
            }
        }

        Self {
            source_lines,
            result_lines,
            steps: operations.iter().map(StepSummary::from).collect(),
            dropped: runs(&coverage, |count| count == 0),
            duplicated: runs(&coverage, |count| count > 1),
        }
    }

    pub fn dropped_lines(&self) -> usize {
        self.dropped.iter().map(LineSpan::line_count).sum()
    }

    pub fn inserted_lines(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                StepSummary::Insert { lines } => *lines,
                StepSummary::Keep { .. } => 0,
            })
            .sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Maximal runs of indices whose count satisfies `predicate`.
fn runs(coverage: &[usize], predicate: impl Fn(usize) -> bool) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut run_start = None;
    for (index, &count) in coverage.iter().enumerate() {
        match (predicate(count), run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                spans.extend(LineSpan::from_range(start, index));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        spans.extend(LineSpan::from_range(start, coverage.len()));
    }
    spans
}
