//! Project configuration (`platformio.ini` layout).
//!
//! Only what the publisher reads is supported: `[section]` headers,
//! `key = value` pairs, and `;`/`#` comments, either on their own line or
//! trailing after whitespace. Option names are case-insensitive. Multi-line
//! values are not parsed.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ConfigError;

/// Default project configuration filename, relative to the project directory.
pub const PROJECT_CONFIG_FILE: &str = "platformio.ini";

/// Parsed project configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    sections: HashMap<String, HashMap<String, String>>,
}

impl ProjectConfig {
    /// Load from a file. A missing file yields an empty configuration.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn parse(content: &str) -> Self {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = strip_inline_comment(line).trim();
            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }
            // Keys outside any section are ignored
            let Some(section) = current.as_ref() else {
                continue;
            };
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key.trim().to_lowercase(), value.to_string());
            }
        }

        Self { sections }
    }

    /// Strict lookup: fails when the section or key is absent.
    pub fn get(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        let values = self
            .sections
            .get(section)
            .ok_or_else(|| ConfigError::MissingSection(section.to_string()))?;
        values
            .get(&key.to_lowercase())
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Environment-scoped option: `[env:<name>]` first, then the shared `[env]`.
    ///
    /// Empty values count as unset.
    pub fn option(&self, env_name: Option<&str>, key: &str) -> Option<String> {
        let scoped = env_name.map(|name| format!("env:{}", name));
        scoped
            .as_deref()
            .into_iter()
            .chain(std::iter::once("env"))
            .filter_map(|section| self.get(section, key).ok())
            .find(|value| !value.is_empty())
    }
}

/// Cut a line at the first `;` or `#` that starts the line or follows whitespace.
fn strip_inline_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (idx, ch) in line.char_indices() {
        if (ch == ';' || ch == '#') && prev_is_space {
            return &line[..idx];
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}
