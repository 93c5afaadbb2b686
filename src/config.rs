//! Publish configuration.
//!
//! Everything the publisher needs is gathered here once and passed down
//! explicitly. Values come from, in order of precedence:
//! 1. Command-line overrides
//! 2. Process environment variables
//! 3. A `.env` file in the project directory
//! 4. Defaults derived from the project directory
//!
//! Project name and version additionally fall back to the project
//! configuration file (see [`crate::metadata`]).

use anyhow::{bail, Result};
use clap::ValueEnum;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::metadata::{resolve_metadata, Metadata};
use crate::project::{ProjectConfig, PROJECT_CONFIG_FILE};

/// Default build output directory, relative to the project directory.
pub const DEFAULT_BUILD_SUBDIR: &str = ".pio/build";
/// Default release directory, relative to the project directory.
pub const DEFAULT_RELEASE_SUBDIR: &str = "firmware";

/// What to do when the firmware image is missing from the build output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PublishMode {
    /// Abort the publish step and report the expected source path.
    #[default]
    Strict,
    /// Log the absence and publish whatever else is there.
    Lenient,
}

impl std::fmt::Display for PublishMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishMode::Strict => f.write_str("strict"),
            PublishMode::Lenient => f.write_str("lenient"),
        }
    }
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub env_name: Option<String>,
    pub release_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub project_name: Option<String>,
    pub version: Option<String>,
    pub mode: Option<PublishMode>,
}

/// Fully resolved inputs of one publish run.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Target environment; selects a per-environment subdirectory of `build_dir`.
    pub env_name: Option<String>,
    pub release_dir: PathBuf,
    pub config_file: PathBuf,
    pub project_name: String,
    pub version: String,
    pub mode: PublishMode,
}

impl PublishConfig {
    /// Resolve configuration from overrides, the process environment and `.env`.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let project_dir = overrides
            .project_dir
            .clone()
            .or_else(|| std::env::var_os("PROJECT_DIR").map(PathBuf::from))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut env_vars = read_dotenv(&project_dir);
        // Environment variables override .env file
        env_vars.extend(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );

        Self::from_sources(project_dir, overrides, &env_vars)
    }

    /// Resolve configuration from an explicit variable map.
    ///
    /// `vars` plays the role of the process environment; tests use this to
    /// avoid touching real environment variables.
    pub fn from_sources(
        project_dir: PathBuf,
        overrides: Overrides,
        vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let var = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();
        let path_var = |key: &str| var(key).map(|s| absolutize(&project_dir, &s));

        let build_dir = overrides
            .build_dir
            .or_else(|| path_var("BUILD_DIR"))
            .unwrap_or_else(|| project_dir.join(DEFAULT_BUILD_SUBDIR));

        let env_name = overrides.env_name.or_else(|| var("PIOENV"));

        let release_dir = overrides
            .release_dir
            .or_else(|| path_var("RELEASE_DIR"))
            .unwrap_or_else(|| project_dir.join(DEFAULT_RELEASE_SUBDIR));

        let config_file = overrides
            .config_file
            .or_else(|| path_var("PROJECT_CONFIG"))
            .unwrap_or_else(|| project_dir.join(PROJECT_CONFIG_FILE));

        let mode = match overrides.mode {
            Some(mode) => mode,
            None => match var("PUBLISH_MODE") {
                Some(raw) => match PublishMode::from_str(&raw, true) {
                    Ok(mode) => mode,
                    Err(_) => bail!(
                        "Invalid PUBLISH_MODE '{}' (expected 'strict' or 'lenient')",
                        raw
                    ),
                },
                None => PublishMode::default(),
            },
        };

        let project = match ProjectConfig::load(&config_file) {
            Ok(project) => project,
            Err(e) => {
                warn!(
                    "Cannot read project configuration {}: {} (using defaults)",
                    config_file.display(),
                    e
                );
                ProjectConfig::default()
            }
        };

        let explicit_name = overrides.project_name.or_else(|| var("PROJECT_NAME"));
        let explicit_version = overrides.version.or_else(|| var("PROJECT_VERSION"));
        let Metadata {
            project_name,
            version,
        } = resolve_metadata(
            &project,
            env_name.as_deref(),
            explicit_name.as_deref(),
            explicit_version.as_deref(),
        );

        Ok(Self {
            project_dir,
            build_dir,
            env_name,
            release_dir,
            config_file,
            project_name,
            version,
            mode,
        })
    }

    /// Directory holding the raw build artifacts for the selected environment.
    pub fn artifact_dir(&self) -> PathBuf {
        match &self.env_name {
            Some(env) => self.build_dir.join(env),
            None => self.build_dir.clone(),
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  PROJECT_DIR:     {}", self.project_dir.display());
        println!("  BUILD_DIR:       {}", self.build_dir.display());
        println!(
            "  PIOENV:          {}",
            self.env_name.as_deref().unwrap_or("(none)")
        );
        println!("  RELEASE_DIR:     {}", self.release_dir.display());
        println!("  PROJECT_CONFIG:  {}", self.config_file.display());
        println!("  PROJECT_NAME:    {}", self.project_name);
        println!("  PROJECT_VERSION: {}", self.version);
        println!("  PUBLISH_MODE:    {}", self.mode);
        if self.artifact_dir().is_dir() {
            println!("  Build output: FOUND ({})", self.artifact_dir().display());
        } else {
            println!(
                "  Build output: NOT FOUND ({})",
                self.artifact_dir().display()
            );
        }
    }
}

fn absolutize(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Variables from `<project_dir>/.env`, if present.
fn read_dotenv(project_dir: &Path) -> HashMap<String, String> {
    let env_path = project_dir.join(".env");
    let mut vars = HashMap::new();
    if !env_path.exists() {
        return vars;
    }
    match dotenvy::from_path_iter(&env_path) {
        Ok(iter) => {
            for item in iter {
                match item {
                    Ok((key, value)) => {
                        vars.insert(key, value);
                    }
                    Err(e) => warn!("Skipping malformed line in {}: {}", env_path.display(), e),
                }
            }
            debug!("Loaded {} variables from {}", vars.len(), env_path.display());
        }
        Err(e) => warn!("Cannot read {}: {}", env_path.display(), e),
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_derive_from_project_dir() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();

        let cfg = PublishConfig::from_sources(root.clone(), Overrides::default(), &vars(&[]))
            .unwrap();

        assert_eq!(cfg.build_dir, root.join(".pio/build"));
        assert_eq!(cfg.release_dir, root.join("firmware"));
        assert_eq!(cfg.config_file, root.join("platformio.ini"));
        assert_eq!(cfg.env_name, None);
        assert_eq!(cfg.mode, PublishMode::Strict);
        assert_eq!(cfg.project_name, "firmware");
        assert_eq!(cfg.version, "dev");
        assert_eq!(cfg.artifact_dir(), root.join(".pio/build"));
    }

    #[test]
    fn test_env_vars_and_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();

        let cfg = PublishConfig::from_sources(
            root.clone(),
            Overrides::default(),
            &vars(&[
                ("BUILD_DIR", "out"),
                ("PIOENV", "esp32dev"),
                ("RELEASE_DIR", "/abs/release"),
                ("PUBLISH_MODE", "Lenient"),
                ("PROJECT_NAME", "Demo"),
                ("PROJECT_VERSION", "1.2"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.build_dir, root.join("out"));
        assert_eq!(cfg.artifact_dir(), root.join("out/esp32dev"));
        assert_eq!(cfg.release_dir, PathBuf::from("/abs/release"));
        assert_eq!(cfg.mode, PublishMode::Lenient);
        assert_eq!(cfg.project_name, "Demo");
        assert_eq!(cfg.version, "1.2");
    }

    #[test]
    fn test_overrides_beat_env_vars() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        let overrides = Overrides {
            build_dir: Some(PathBuf::from("/cli/build")),
            mode: Some(PublishMode::Strict),
            version: Some("3.0".to_string()),
            ..Default::default()
        };

        let cfg = PublishConfig::from_sources(
            root,
            overrides,
            &vars(&[
                ("BUILD_DIR", "/env/build"),
                ("PUBLISH_MODE", "lenient"),
                ("PROJECT_VERSION", "2.0"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.build_dir, PathBuf::from("/cli/build"));
        assert_eq!(cfg.mode, PublishMode::Strict);
        assert_eq!(cfg.version, "3.0");
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = PublishConfig::from_sources(
            tmp.path().to_path_buf(),
            Overrides::default(),
            &vars(&[("PUBLISH_MODE", "sloppy")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("sloppy"));
    }

    #[test]
    fn test_metadata_from_project_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("platformio.ini"),
            "[project]\nproject_name = ShackMate-CIV\nversion = 1.0.3\n",
        )
        .unwrap();

        let cfg = PublishConfig::from_sources(
            tmp.path().to_path_buf(),
            Overrides::default(),
            &vars(&[]),
        )
        .unwrap();

        assert_eq!(cfg.project_name, "ShackMate-CIV");
        assert_eq!(cfg.version, "1.0.3");
    }

    #[test]
    #[serial]
    fn test_load_reads_dotenv_and_env_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".env"),
            "# local settings\nPIOENV=from-dotenv\nPROJECT_VERSION=\"0.5\"\n",
        )
        .unwrap();

        std::env::set_var("PROJECT_VERSION", "0.6");
        let cfg = PublishConfig::load(Overrides {
            project_dir: Some(tmp.path().to_path_buf()),
            ..Default::default()
        });
        std::env::remove_var("PROJECT_VERSION");
        let cfg = cfg.unwrap();

        assert_eq!(cfg.project_dir, tmp.path());
        assert_eq!(cfg.version, "0.6");
        // PIOENV may also be set by the host running the tests
        if std::env::var_os("PIOENV").is_none() {
            assert_eq!(cfg.env_name.as_deref(), Some("from-dotenv"));
        }
    }
}
