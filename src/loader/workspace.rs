//! Package and workspace root discovery, and `--package` resolution.

use crate::constants::{PACKAGE_MANIFEST, WORKSPACE_MARKER, WORKSPACE_PACKAGE_DIRS};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());
    start.ancestors().find(|dir| dir.join(marker).is_file()).map(Path::to_path_buf)
}

/// Walks upward from `start` to the nearest directory holding a `package.json`.
pub fn find_package_root<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    find_upward(start.as_ref(), PACKAGE_MANIFEST)
}

/// Walks upward from `start` to the nearest directory holding a `pnpm-workspace.yaml`.
pub fn find_workspace_root<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    find_upward(start.as_ref(), WORKSPACE_MARKER)
}

fn read_package_name(manifest: &Path) -> Option<String> {
    let content = std::fs::read_to_string(manifest).ok()?;
    let value: serde_json::Value = serde_json::from_str(&content).ok()?;
    value.get("name")?.as_str().map(str::to_string)
}

/// Maps package names to their directories.
///
/// `packages/*` is scanned before `apps/*` and later entries overwrite
/// earlier ones, so an app wins a name collision. Scoped names such as
/// `@scope/ui` are also registered under their short name `ui`. Packages
/// with a missing or unreadable manifest are skipped.
pub fn build_package_map<P: AsRef<Path>>(workspace_root: P) -> HashMap<String, PathBuf> {
    let mut map = HashMap::new();

    for dir in WORKSPACE_PACKAGE_DIRS {
        let full_dir = workspace_root.as_ref().join(dir);
        let Ok(entries) = std::fs::read_dir(&full_dir) else {
            continue;
        };

        let mut package_dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        package_dirs.sort();

        for package_dir in package_dirs {
            let Some(name) = read_package_name(&package_dir.join(PACKAGE_MANIFEST)) else {
                continue;
            };
            if let Some((_, short_name)) =
                name.strip_prefix('@').and_then(|scoped| scoped.split_once('/'))
            {
                map.insert(short_name.to_string(), package_dir.clone());
            }
            map.insert(name, package_dir);
        }
    }

    map
}

/// Resolves a `--package` specifier to a package directory.
///
/// Accepts absolute paths, `./` or `../` paths relative to the current
/// directory, `apps/...` or `packages/...` paths relative to the workspace
/// root, and package names (scoped or short).
pub fn resolve_package_dir<P: AsRef<Path>>(specifier: &str, workspace_root: P) -> Option<PathBuf> {
    let workspace_root = workspace_root.as_ref();
    let existing = |path: PathBuf| path.exists().then_some(path);

    if Path::new(specifier).is_absolute() {
        return existing(PathBuf::from(specifier));
    }

    if specifier.starts_with("./") || specifier.starts_with("../") {
        let cwd = std::env::current_dir().ok()?;
        return existing(cwd.join(specifier));
    }

    if WORKSPACE_PACKAGE_DIRS.iter().any(|dir| specifier.starts_with(&format!("{dir}/"))) {
        return existing(workspace_root.join(specifier));
    }

    debug!("Looking up package '{specifier}' in {}", workspace_root.display());
    build_package_map(workspace_root).remove(specifier)
}
