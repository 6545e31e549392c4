//! Ignore patterns for template trees.
//! Editor and OS droppings such as `.DS_Store` are never materialized.

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Builds a glob set from `patterns`.
///
/// # Errors
/// * `Error::ConfigError` if a pattern is not a valid glob
pub fn build_ignore_set<'a, I>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            Error::ConfigError(format!("Ignore pattern '{pattern}' is invalid: {e}"))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("Ignore patterns could not be built: {e}")))
}

/// The glob set applied to every template directory.
pub fn default_ignore_set() -> Result<GlobSet> {
    build_ignore_set(DEFAULT_IGNORE_PATTERNS)
}
