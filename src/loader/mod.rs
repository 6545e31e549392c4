//! Configuration resolution.
//!
//! Layers are applied in the order defaults, workspace root, package root.
//! A layer that fails to load or validate is logged and skipped, so a broken
//! workspace config never blocks generation in a package.

use crate::config::{FileFactoryConfig, PartialConfig};
use crate::constants::{CONFIG_DIR, TEMPLATES_DIR};
use crate::error::{Error, Result};
use crate::schema::validate_partial;
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub mod file;
pub mod interface;
pub mod workspace;

pub use file::{find_config_file, FileConfigProvider, InlineConfigProvider};
pub use interface::ConfigProvider;
pub use workspace::{
    build_package_map, find_package_root, find_workspace_root, resolve_package_dir,
};

/// Roots to resolve configuration for. Missing roots are discovered from the
/// current directory.
#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
    pub package_root: Option<PathBuf>,
    pub workspace_root: Option<PathBuf>,
}

/// The merged configuration and where its layers came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: FileFactoryConfig,
    pub package_config_path: Option<PathBuf>,
    pub workspace_config_path: Option<PathBuf>,
    pub package_root: PathBuf,
    pub workspace_root: Option<PathBuf>,
}

/// Loads, validates and parses one layer, or returns `None` after logging a warning.
pub fn load_layer(provider: &dyn ConfigProvider) -> Option<PartialConfig> {
    let source = provider.source();
    let layer = provider
        .provide()
        .and_then(|value| {
            validate_partial(&value)?;
            serde_json::from_value::<PartialConfig>(value)
                .map_err(|e| Error::ConfigError(e.to_string()))
        })
        .inspect_err(|e| warn!("Invalid configuration in {source}: {e}"))
        .ok()?;

    debug!("Loaded configuration layer from {source}");
    Some(layer)
}

/// Merges layers over the defaults in order; later layers win field by field.
pub fn merge_layers(providers: &[&dyn ConfigProvider]) -> FileFactoryConfig {
    providers
        .iter()
        .filter_map(|provider| load_layer(*provider))
        .fold(FileFactoryConfig::default(), FileFactoryConfig::merged)
}

/// Resolves the configuration for a package.
///
/// # Errors
/// * `Error::IoError` if no package root is given or found and the current
///   directory cannot be determined
pub fn resolve_config(options: ResolveOptions) -> Result<ResolvedConfig> {
    let package_root = match options.package_root {
        Some(root) => std::path::absolute(root)?,
        None => {
            let cwd = std::env::current_dir()?;
            find_package_root(&cwd).unwrap_or(cwd)
        }
    };
    let workspace_root = match options.workspace_root {
        Some(root) => Some(std::path::absolute(root)?),
        None => find_workspace_root(&package_root),
    };

    let workspace_config_path = workspace_root.as_deref().and_then(find_config_file);
    let package_config_path = find_config_file(&package_root);

    let workspace_provider = workspace_config_path.as_deref().map(FileConfigProvider::new);
    let package_provider = package_config_path.as_deref().map(FileConfigProvider::new);

    let mut providers: Vec<&dyn ConfigProvider> = Vec::new();
    if let Some(provider) = &workspace_provider {
        providers.push(provider);
    }
    // A package that is itself the workspace root has a single layer.
    if package_config_path != workspace_config_path {
        if let Some(provider) = &package_provider {
            providers.push(provider);
        }
    }

    Ok(ResolvedConfig {
        config: merge_layers(&providers),
        package_config_path,
        workspace_config_path,
        package_root,
        workspace_root,
    })
}

/// Places the built-in templates are looked for, in order: the crate's
/// source tree, next to the executable, and `../share/file-factory/`
/// relative to the executable's directory.
pub fn builtin_template_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR)];
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(TEMPLATES_DIR));
        candidates.push(exe_dir.join("..").join("share").join("file-factory").join(TEMPLATES_DIR));
    }
    candidates
}

/// Returns the first existing built-in templates directory.
///
/// The source-tree location is compiled in, so a binary moved off the build
/// machine needs its templates installed next to it. When no candidate
/// exists the source-tree path is returned and template lookup reports
/// `TemplatesNotFoundError` naming the requested type.
pub fn builtin_templates_dir() -> PathBuf {
    let candidates = builtin_template_candidates();
    match candidates.iter().find(|candidate| candidate.is_dir()) {
        Some(found) => found.clone(),
        None => {
            debug!("No built-in templates found in {candidates:?}");
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR)
        }
    }
}

/// Finds the template set for `template_type`: package first, then
/// workspace, then built-in.
///
/// # Errors
/// * `Error::TemplatesNotFoundError` if none of the candidates exists
pub fn find_templates_dir(
    template_type: &str,
    package_root: &Path,
    workspace_root: Option<&Path>,
    builtin_dir: &Path,
) -> Result<PathBuf> {
    let overrides = std::iter::once(package_root)
        .chain(workspace_root)
        .map(|root| root.join(CONFIG_DIR).join(TEMPLATES_DIR).join(template_type));

    overrides
        .chain(std::iter::once(builtin_dir.join(template_type)))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| Error::TemplatesNotFoundError { template_type: template_type.to_string() })
}

/// Lists the template types (subdirectories) available in `templates_dir`, sorted.
pub fn available_template_types<P: AsRef<Path>>(templates_dir: P) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(templates_dir) else {
        return Vec::new();
    };
    let mut types: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    types.sort();
    types
}
