pub mod cli;
pub mod document;
pub mod patch;
pub mod splice;
mod tables;
pub mod telemetry;

pub use splice::{Operation, SpliceError, splice};

#[cfg(feature = "python")]
mod python {
    use std::path::PathBuf;

    use pyo3::exceptions::PyRuntimeError;
    use pyo3::prelude::*;

    use crate::patch::{self, EditSource, Request};

    #[pyfunction]
    #[pyo3(signature = (path, plan, output=None, dry_run=false))]
    /// Apply a JSON edit plan to a file.
    ///
    /// Args:
    ///     path: File to edit
    ///     plan: Path to the JSON edit plan
    ///     output: Write the result here instead of overwriting `path` (default: None)
    ///     dry_run: If True, report the changes without writing (default: False)
    ///
    /// Returns:
    ///     The change report as a JSON string
    ///
    /// Raises:
    ///     RuntimeError: If the plan cannot be resolved or the splice fails
    fn splice_file(
        path: PathBuf,
        plan: PathBuf,
        output: Option<PathBuf>,
        dry_run: bool,
    ) -> PyResult<String> {
        let request = Request {
            file: path,
            edit: EditSource::Plan(plan),
            output,
            dry_run,
        };
        let outcome = patch::run(&request).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        outcome
            .report
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// A Python module implemented in Rust. The name of this function must match
    /// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
    /// import the module.
    #[pymodule]
    fn region_splice(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(splice_file, m)?)?;

        Ok(())
    }
}
