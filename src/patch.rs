use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::document::{DocumentError, read_document, write_document};
use crate::splice::boundary::{self, BoundaryError};
use crate::splice::plan::{Plan, PlanError};
use crate::splice::report::{SpliceReport, written_line_count};
use crate::splice::{Operation, SpliceError, splice};
use crate::tables::{TableOptions, get_table};

#[derive(Debug, Error)]
pub enum PatchError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    #[error(transparent)]
    Splice(#[from] SpliceError),
    #[error("Failed to read replacement {}: {source}", path.display())]
    Replacement {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to render report: {0}")]
    Render(String),
}

/// Where the operations for a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSource {
    /// A JSON edit plan.
    Plan(PathBuf),
    /// Replace displayed lines `first..=last` with the contents of `with`.
    ReplaceLines {
        first: usize,
        last: usize,
        with: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub file: PathBuf,
    pub edit: EditSource,
    /// Write here instead of over `file`.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: SpliceReport,
    /// `None` on a dry run.
    pub written_to: Option<PathBuf>,
}

impl EditSource {
    fn operations(&self, document: &[String]) -> Result<Vec<Operation>, PatchError> {
        match self {
            EditSource::Plan(plan_path) => {
                let plan = Plan::load(plan_path)?;
                if let Some(description) = &plan.description {
                    info!(%description, "applying plan");
                }
                let base_dir = plan_dir(plan_path);
                Ok(plan.resolve(document, base_dir)?)
            }
            EditSource::ReplaceLines { first, last, with } => {
                let content =
                    std::fs::read_to_string(with).map_err(|source| PatchError::Replacement {
                        path: with.clone(),
                        source,
                    })?;
                Ok(boundary::replace_lines(
                    *first,
                    *last,
                    document.len(),
                    content,
                )?)
            }
        }
    }
}

fn plan_dir(plan_path: &Path) -> &Path {
    match plan_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Loads the document, splices it and, unless this is a dry run, writes the
/// result. Nothing is written if any step fails.
pub fn run(request: &Request) -> Result<Outcome, PatchError> {
    if request.dry_run {
        info!("dry run detected, no changes will be made");
    }
    let document = read_document(&request.file)?;
    let operations = request.edit.operations(&document)?;
    let result = splice(&document, &operations)?;
    let report = SpliceReport::new(document.len(), &operations, written_line_count(&result));
    debug!(
        dropped = report.dropped_lines(),
        inserted = report.inserted_lines(),
        "splice complete"
    );

    if request.dry_run {
        return Ok(Outcome {
            report,
            written_to: None,
        });
    }

    let target = request.output.as_ref().unwrap_or(&request.file);
    write_document(target, &result)?;
    info!(path = %target.display(), lines = report.result_lines, "document written");
    Ok(Outcome {
        report,
        written_to: Some(target.clone()),
    })
}

/// Renders the dry-run tables for `report`.
pub fn changes_summary(report: &SpliceReport) -> Result<String, PatchError> {
    let mut sections = vec![render(TableOptions::Summary(report))?];
    sections.push(render(TableOptions::Steps(report))?);
    if !report.dropped.is_empty() {
        sections.push(render(TableOptions::Dropped(report))?);
    }
    Ok(sections.join("\n\n"))
}

fn render(options: TableOptions<'_>) -> Result<String, PatchError> {
    get_table(options)
        .display()
        .map(|table| table.to_string())
        .map_err(|e| PatchError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splice::test_helpers::{
        create_fragment_file, create_plan_file, numbered_text, setup_test_env,
    };
    use std::fs;

    fn plan_request(file: PathBuf, plan: PathBuf) -> Request {
        Request {
            file,
            edit: EditSource::Plan(plan),
            output: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_run_plan_in_place() {
        let (temp_dir, file_path) = setup_test_env(&numbered_text(10));
        let plan_path = create_plan_file(
            temp_dir.path(),
            r#"{ "operations": [
                { "op": "keep", "start": 0, "end": 3 },
                { "op": "insert", "text": "NEW\n" },
                { "op": "keep", "start": 7, "end": "eof" }
            ] }"#,
        );

        let outcome = run(&plan_request(file_path.clone(), plan_path)).unwrap();

        assert_eq!(outcome.written_to, Some(file_path.clone()));
        assert_eq!(outcome.report.result_lines, 7);
        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "L0\nL1\nL2\nNEW\nL7\nL8\nL9\n");
    }

    #[test]
    fn test_run_replaces_function_between_anchors() {
        let original = [
            "const state = {};\r\n",
            "\r\n",
            "function renderStudentDetail(id) {\r\n",
            "    return old(id);\r\n",
            "}\r\n",
            "leftover debris\r\n",
            "function renderSessionDetail(id) {\r\n",
            "}\r\n",
        ]
        .concat();
        let (temp_dir, file_path) = setup_test_env(&original);
        create_fragment_file(
            temp_dir.path(),
            "render_student_detail.js",
            "function renderStudentDetail(id) {\r\n    return fresh(id);\r\n}\r\n",
        );
        let plan_path = create_plan_file(
            temp_dir.path(),
            r#"{
                "description": "replace renderStudentDetail",
                "operations": [
                    { "op": "keep", "start": 0, "end": { "anchor": "^function renderStudentDetail" } },
                    { "op": "insert_file", "path": "render_student_detail.js" },
                    { "op": "keep", "start": { "anchor": "^function renderSessionDetail" }, "end": "eof" }
                ]
            }"#,
        );

        let outcome = run(&plan_request(file_path.clone(), plan_path)).unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        let expected = [
            "const state = {};\r\n",
            "\r\n",
            "function renderStudentDetail(id) {\r\n",
            "    return fresh(id);\r\n",
            "}\r\n",
            "function renderSessionDetail(id) {\r\n",
            "}\r\n",
        ]
        .concat();
        assert_eq!(content, expected);
        assert_eq!(outcome.report.dropped_lines(), 4);
    }

    #[test]
    fn test_run_replace_lines_to_output() {
        let (temp_dir, file_path) = setup_test_env(&numbered_text(10));
        let fragment = create_fragment_file(temp_dir.path(), "new.txt", "NEW\n");
        let output = temp_dir.path().join("patched.txt");

        let outcome = run(&Request {
            file: file_path.clone(),
            edit: EditSource::ReplaceLines {
                first: 4,
                last: 7,
                with: fragment,
            },
            output: Some(output.clone()),
            dry_run: false,
        })
        .unwrap();

        assert_eq!(outcome.written_to, Some(output.clone()));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "L0\nL1\nL2\nNEW\nL7\nL8\nL9\n"
        );
        // the source is untouched when an output path is given
        assert_eq!(fs::read_to_string(&file_path).unwrap(), numbered_text(10));
    }

    #[test]
    fn test_run_dry_run_writes_nothing() {
        let (temp_dir, file_path) = setup_test_env(&numbered_text(10));
        let plan_path = create_plan_file(
            temp_dir.path(),
            r#"{ "operations": [ { "op": "keep", "start": 0, "end": 2 } ] }"#,
        );

        let mut request = plan_request(file_path.clone(), plan_path);
        request.dry_run = true;
        let outcome = run(&request).unwrap();

        assert_eq!(outcome.written_to, None);
        assert_eq!(outcome.report.result_lines, 2);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), numbered_text(10));
    }

    #[test]
    fn test_run_out_of_range_leaves_file_untouched() {
        let (temp_dir, file_path) = setup_test_env(&numbered_text(10));
        let fragment = create_fragment_file(temp_dir.path(), "new.txt", "NEW\n");

        let result = run(&Request {
            file: file_path.clone(),
            edit: EditSource::ReplaceLines {
                first: 4,
                last: 20,
                with: fragment,
            },
            output: None,
            dry_run: false,
        });

        assert!(matches!(
            result,
            Err(PatchError::Splice(SpliceError::OutOfRange { .. }))
        ));
        assert_eq!(fs::read_to_string(&file_path).unwrap(), numbered_text(10));
    }

    #[test]
    fn test_run_missing_replacement_file() {
        let (temp_dir, file_path) = setup_test_env(&numbered_text(3));
        let result = run(&Request {
            file: file_path,
            edit: EditSource::ReplaceLines {
                first: 1,
                last: 1,
                with: temp_dir.path().join("missing.txt"),
            },
            output: None,
            dry_run: false,
        });
        assert!(matches!(result, Err(PatchError::Replacement { .. })));
    }

    #[test]
    fn test_run_missing_document() {
        let (temp_dir, _) = setup_test_env("");
        let plan_path = create_plan_file(
            temp_dir.path(),
            r#"{ "operations": [ { "op": "insert", "text": "x" } ] }"#,
        );
        let result = run(&plan_request(temp_dir.path().join("missing.js"), plan_path));
        assert!(matches!(result, Err(PatchError::Document(_))));
    }

    #[test]
    fn test_run_insert_only_on_empty_file() {
        let (temp_dir, file_path) = setup_test_env("");
        let plan_path = create_plan_file(
            temp_dir.path(),
            r#"{ "operations": [ { "op": "insert", "text": "a\nb\n" } ] }"#,
        );
        run(&plan_request(file_path.clone(), plan_path)).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_run_reports_written_lines_for_unterminated_insert() {
        let (temp_dir, file_path) = setup_test_env("a\nb\n");
        let plan_path = create_plan_file(
            temp_dir.path(),
            r#"{ "operations": [
                { "op": "keep", "start": 0, "end": 1 },
                { "op": "insert", "text": "tail" },
                { "op": "keep", "start": 1, "end": 2 }
            ] }"#,
        );
        let outcome = run(&plan_request(file_path.clone(), plan_path)).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "a\ntailb\n");
        assert_eq!(outcome.report.result_lines, 2);
        assert_eq!(outcome.report.inserted_lines(), 0);
    }

    #[test]
    fn test_changes_summary_includes_dropped_table() {
        let report = SpliceReport::new(
            10,
            &[
                Operation::keep(0, 3),
                Operation::insert("NEW\n"),
                Operation::keep(7, 10),
            ],
            7,
        );
        let summary = changes_summary(&report).unwrap();
        assert!(summary.contains("Dropped Lines"));
        assert!(summary.contains("4-7"));
    }

    #[test]
    fn test_plan_dir_of_bare_file_name() {
        assert_eq!(plan_dir(Path::new("plan.json")), Path::new("."));
        assert_eq!(plan_dir(Path::new("edits/plan.json")), Path::new("edits"));
    }
}
