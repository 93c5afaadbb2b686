//! Project name and version resolution.
//!
//! Each field is resolved by an ordered chain of resolvers; the first one that
//! produces a value wins. The chain ends in a hardcoded default, so resolution
//! never fails.

use tracing::debug;

use crate::project::ProjectConfig;

/// Project name used when nothing else resolves.
pub const DEFAULT_PROJECT_NAME: &str = "firmware";
/// Version used when nothing else resolves.
pub const DEFAULT_VERSION: &str = "dev";

/// Where a resolver looks up a value.
pub struct Lookup<'a> {
    pub project: &'a ProjectConfig,
    pub env_name: Option<&'a str>,
    /// Explicit value from the command line or environment.
    pub explicit: Option<&'a str>,
}

/// A single step in a resolver chain.
pub type Resolver = fn(&Lookup<'_>, &str) -> Option<String>;

fn from_explicit(lookup: &Lookup<'_>, _key: &str) -> Option<String> {
    lookup.explicit.filter(|v| !v.is_empty()).map(str::to_string)
}

fn from_project_section(lookup: &Lookup<'_>, key: &str) -> Option<String> {
    match lookup.project.get("project", key) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

fn from_env_option(lookup: &Lookup<'_>, key: &str) -> Option<String> {
    lookup.project.option(lookup.env_name, key)
}

/// Resolution order shared by every metadata field.
pub const RESOLVERS: &[Resolver] = &[from_explicit, from_project_section, from_env_option];

/// Run `resolvers` in order for `key`, returning the first hit or `default`.
pub fn resolve_field(
    resolvers: &[Resolver],
    lookup: &Lookup<'_>,
    key: &str,
    default: &str,
) -> String {
    resolvers
        .iter()
        .find_map(|resolve| resolve(lookup, key))
        .unwrap_or_else(|| {
            debug!("'{}' unresolved, using default '{}'", key, default);
            default.to_string()
        })
}

/// Resolved project identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub project_name: String,
    pub version: String,
}

/// Resolve project name and version.
///
/// `explicit_name`/`explicit_version` come from CLI flags or environment
/// variables and take precedence over the project configuration.
pub fn resolve_metadata(
    project: &ProjectConfig,
    env_name: Option<&str>,
    explicit_name: Option<&str>,
    explicit_version: Option<&str>,
) -> Metadata {
    let name_lookup = Lookup {
        project,
        env_name,
        explicit: explicit_name,
    };
    let version_lookup = Lookup {
        project,
        env_name,
        explicit: explicit_version,
    };
    Metadata {
        project_name: resolve_field(
            RESOLVERS,
            &name_lookup,
            "project_name",
            DEFAULT_PROJECT_NAME,
        ),
        version: resolve_field(RESOLVERS, &version_lookup, "version", DEFAULT_VERSION),
    }
}
