use std::ops::Range;

use tracing::debug;

use crate::splice::operation::{Operation, SpliceError};

/// Splits text into lines that each keep their own terminator.
///
/// `"a\r\nb"` becomes `["a\r\n", "b"]`; the empty string yields no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Validates a keep range against a document of `len` lines.
///
/// Takes signed bounds so that negative caller input is reported as
/// `OutOfRange` instead of being unrepresentable.
pub fn checked_range(start: i64, end: i64, len: usize) -> Result<Range<usize>, SpliceError> {
    let out_of_range = || SpliceError::OutOfRange { start, end, len };
    let start_idx = usize::try_from(start).map_err(|_| out_of_range())?;
    let end_idx = usize::try_from(end).map_err(|_| out_of_range())?;
    if start_idx > end_idx || end_idx > len {
        return Err(out_of_range());
    }
    Ok(start_idx..end_idx)
}

pub(crate) fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// Reassembles `document` according to `operations`.
///
/// Keeps are copied verbatim in the order listed and inserts are split into
/// lines and emitted where they appear. Every keep is bounds-checked before
/// any output is built, so an error never comes with partial output. The
/// input is never modified. Overlapping or unordered keeps are not rejected;
/// they simply produce what they describe.
pub fn splice<S: AsRef<str>>(
    document: &[S],
    operations: &[Operation],
) -> Result<Vec<String>, SpliceError> {
    let len = document.len();
    let mut capacity = 0;
    for operation in operations {
        if let Operation::KeepRange { start, end } = operation {
            let range = checked_range(to_signed(*start), to_signed(*end), len)?;
            capacity += range.len();
        }
    }

    let mut result = Vec::with_capacity(capacity);
    for operation in operations {
        match operation {
            Operation::KeepRange { start, end } => {
                result.extend(document[*start..*end].iter().map(|l| l.as_ref().to_string()));
            }
            Operation::Insert(content) => result.extend(split_lines(content)),
        }
    }

    debug!(
        source_lines = len,
        operations = operations.len(),
        result_lines = result.len(),
        "spliced document"
    );
    Ok(result)
}
