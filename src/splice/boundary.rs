//! Conversions from displayed line numbers to splice indices.
//!
//! Editors and humans count lines from 1 and name ranges inclusively
//! ("lines 944 to 956"). The splice core works on zero-based, half-open
//! ranges. Index `N - 1` is displayed line `N`, so:
//!
//! | displayed                   | index        |
//! |-----------------------------|--------------|
//! | start at line `N`           | `N - 1`      |
//! | keep through line `N`       | `N`          |
//! | lines `first..=last`        | `first - 1..last` |

use thiserror::Error;

use crate::splice::operation::Operation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("line numbers start at 1; got 0")]
    ZeroLineNumber,
    #[error("line span {first}..={last} is inverted")]
    Inverted { first: usize, last: usize },
}

/// Exclusive end index for "keep through displayed line `n`".
///
/// `0` keeps nothing and `len` keeps to the end of the document.
pub fn end_through(n: usize) -> usize {
    n
}

/// Start index for "start at displayed line `n`".
pub fn start_at(n: usize) -> Result<usize, BoundaryError> {
    n.checked_sub(1).ok_or(BoundaryError::ZeroLineNumber)
}

/// Index range `start..end` covering displayed lines `first..=last`.
fn span(first: usize, last: usize) -> Result<(usize, usize), BoundaryError> {
    let start = start_at(first)?;
    let end = end_through(last);
    if start > end {
        return Err(BoundaryError::Inverted { first, last });
    }
    Ok((start, end))
}

/// Keep displayed lines `first..=last`.
pub fn lines(first: usize, last: usize) -> Result<Operation, BoundaryError> {
    let (start, end) = span(first, last)?;
    Ok(Operation::keep(start, end))
}

/// Replace displayed lines `first..=last` of a `len`-line document with
/// `content`.
///
/// An empty span (`last == first - 1`) is a pure insertion before `first`.
/// Bounds against `len` are left to `splice`.
pub fn replace_lines(
    first: usize,
    last: usize,
    len: usize,
    content: impl Into<String>,
) -> Result<Vec<Operation>, BoundaryError> {
    let (start, end) = span(first, last)?;
    Ok(vec![
        Operation::keep(0, start),
        Operation::insert(content),
        Operation::keep(end, len),
    ])
}
