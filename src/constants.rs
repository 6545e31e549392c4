//! Common constants used throughout file-factory.

/// Directory holding configuration, templates and hooks at a package or workspace root
pub const CONFIG_DIR: &str = ".file-factory";

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 4] = ["config.yaml", "config.yml", "config.json", "config.toml"];

/// Subdirectory of [`CONFIG_DIR`] holding template sets
pub const TEMPLATES_DIR: &str = "templates";

/// Subdirectory of [`CONFIG_DIR`] holding lifecycle hook scripts
pub const HOOKS_DIR: &str = "hooks";

/// Manifest marking a package root
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Marker file marking a workspace root
pub const WORKSPACE_MARKER: &str = "pnpm-workspace.yaml";

/// Workspace directories scanned for packages. Later entries win on name collisions.
pub const WORKSPACE_PACKAGE_DIRS: [&str; 2] = ["packages", "apps"];

/// Extension marking a template file whose contents are rendered
pub const TEMPLATE_EXTENSION: &str = ".j2";

/// Header written into newly created barrel files
pub const BARREL_HEADER: &str = "// Auto-generated barrel file\n\n";

/// Template-tree entries that are never materialized
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = ["**/.DS_Store", "**/Thumbs.db"];
