//! Shared helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use enex2html::Config;

/// Directory holding the ENEX fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Reads a fixture into memory.
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Copies a fixture into a fresh temporary directory.
///
/// The returned `TempDir` must be kept alive for the path to stay valid.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).expect("Failed to copy fixture");
    (temp, path)
}

/// Writes an inline ENEX document into `dir`.
pub fn write_archive(dir: &Path, name: &str, xml: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, xml).expect("Failed to write archive");
    path
}

/// Default configuration writing below `root`.
pub fn config_in(root: &Path) -> Config {
    let mut config = Config::default();
    config.output.root = root.join("output");
    config
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
