//! Line-addressed region splicing.
//!
//! [`splice`] is the whole algorithm: a pure function from a document and an
//! ordered list of [`Operation`]s to a new document. Everything else in this
//! module helps callers produce those operations: [`boundary`] converts
//! displayed line numbers, [`anchor`] finds marker lines, [`plan`] reads JSON
//! edit plans and [`report`] describes the outcome.

pub mod anchor;
pub mod boundary;
pub mod engine;
pub mod operation;
pub mod plan;
pub mod report;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use engine::{checked_range, splice, split_lines};
pub use operation::{Operation, SpliceError};
