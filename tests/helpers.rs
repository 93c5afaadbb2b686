//! Shared test utilities for fwpub tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use fwpub::{Overrides, PublishConfig, PublishMode};

/// Test project with a build output directory and a release directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Project root simulation
    pub project_dir: PathBuf,
    /// Build output directory (`.pio/build`)
    pub build_dir: PathBuf,
    /// Release directory (`firmware/`)
    pub release_dir: PathBuf,
}

impl TestEnv {
    /// Create a project with an empty build directory; the release directory
    /// is not created.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().to_path_buf();
        let build_dir = project_dir.join(".pio/build");
        let release_dir = project_dir.join("firmware");

        fs::create_dir_all(&build_dir).expect("Failed to create build dir");

        Self {
            _temp_dir: temp_dir,
            project_dir,
            build_dir,
            release_dir,
        }
    }

    /// Write a raw build artifact into the build directory.
    pub fn build_artifact(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.build_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create artifact parent");
        }
        fs::write(&path, content).expect("Failed to write build artifact");
        path
    }

    /// Write the project configuration file.
    pub fn project_config(&self, content: &str) {
        fs::write(self.project_dir.join("platformio.ini"), content)
            .expect("Failed to write platformio.ini");
    }

    /// Configuration for project "Demo" version "1.2".
    pub fn demo_config(&self, mode: PublishMode) -> PublishConfig {
        self.config(Overrides {
            project_name: Some("Demo".to_string()),
            version: Some("1.2".to_string()),
            mode: Some(mode),
            ..Default::default()
        })
    }

    /// Resolve configuration for this project without reading the process environment.
    pub fn config(&self, overrides: Overrides) -> PublishConfig {
        PublishConfig::from_sources(self.project_dir.clone(), overrides, &HashMap::new())
            .expect("Failed to resolve config")
    }

    pub fn released(&self, name: &str) -> PathBuf {
        self.release_dir.join(name)
    }

    /// Parsed `version.json`.
    pub fn manifest_json(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.released("version.json"))
            .expect("Failed to read version.json");
        serde_json::from_str(&content).expect("version.json is not valid JSON")
    }
}

/// Assert that a file exists with exactly the given content.
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content =
        fs::read(path).unwrap_or_else(|_| panic!("Failed to read file: {}", path.display()));
    assert_eq!(
        content,
        expected,
        "File {} has unexpected content",
        path.display()
    );
}

/// Names of the files in a directory, sorted.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|_| panic!("Failed to list {}", dir.display()))
        .map(|e| e.expect("bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
