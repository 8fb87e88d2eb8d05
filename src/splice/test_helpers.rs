//! Test helper functions shared across splice tests

use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{TempDir, tempdir};

/// Lines `L0\n` through `L{n-1}\n`.
pub fn numbered_document(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("L{i}\n")).collect()
}

/// The same document as a single string, as it would sit on disk.
pub fn numbered_text(n: usize) -> String {
    numbered_document(n).concat()
}

/// Helper function to create a test environment with a target document
pub fn setup_test_env(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let file_path = temp_dir.path().join("app.js");
    fs::write(&file_path, content).expect("Failed to write test document");
    (temp_dir, file_path)
}

/// Helper function to write a plan file next to the target document
pub fn create_plan_file(dir: &Path, json: &str) -> PathBuf {
    let plan_path = dir.join("plan.json");
    fs::write(&plan_path, json).expect("Failed to write plan file");
    plan_path
}

/// Helper function to write a fragment file next to the target document
pub fn create_fragment_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let fragment_path = dir.join(name);
    fs::write(&fragment_path, content).expect("Failed to write fragment file");
    fragment_path
}
