//! Template tree materialization.
//!
//! Walks a template directory, decides per entry whether it is included,
//! interpolates every path segment and writes the result below a target
//! directory. Files ending in the template extension are rendered, all
//! others are copied byte-for-byte.

use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    ignore::default_ignore_set,
    interpolate::{
        get_actual_filename, interpolate, interpolate_filename, should_include_conditional_file,
        ConditionalFlags, Variables,
    },
    renderer::TemplateRenderer,
};

/// A single entry discovered in a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the template directory, `/`-separated
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub is_directory: bool,
}

impl TemplateFile {
    fn depth(&self) -> usize {
        self.relative_path.split('/').count()
    }
}

/// Inputs of a single materialization run.
pub struct ProcessOptions<'a> {
    pub templates_dir: &'a Path,
    pub target_dir: &'a Path,
    /// Variables for `{{Name}}` placeholders in file and directory names
    pub filename_variables: &'a Variables,
    /// Context for rendering template contents
    pub template_data: &'a serde_json::Value,
    pub conditional_flags: &'a ConditionalFlags,
    /// Run the full pipeline without touching the filesystem
    pub dry_run: bool,
}

/// What a run created, or would create in dry-run mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub created_files: Vec<PathBuf>,
    pub created_directories: Vec<PathBuf>,
    /// Template entries excluded by a conditional prefix (absolute template paths)
    pub skipped_files: Vec<PathBuf>,
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(Error::IoError)
}

/// Discovers every entry below `templates_dir`, dotfiles included.
///
/// Directories come first, then shallower paths before deeper ones, then
/// alphabetical order, so an entry never precedes one of its ancestors.
pub fn discover_template_files<P: AsRef<Path>>(templates_dir: P) -> Result<Vec<TemplateFile>> {
    let templates_dir = templates_dir.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(templates_dir).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(templates_dir)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let segments = relative
            .components()
            .map(|c| {
                c.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                    Error::ConfigError(format!("Invalid path: {}", relative.display()))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        files.push(TemplateFile {
            relative_path: segments.join("/"),
            absolute_path: entry.path().to_path_buf(),
            is_directory: entry.file_type().is_dir(),
        });
    }

    files.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.depth().cmp(&b.depth()))
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });

    Ok(files)
}

/// Maps a relative template path onto the target directory.
///
/// Every segment loses its conditional prefix and gets its placeholders
/// interpolated; a file's last segment also loses the template extension.
/// Returns the target path and whether the entry must be rendered, or
/// `None` if some segment interpolates to an empty name.
pub fn resolve_target_path(
    relative_path: &str,
    target_dir: &Path,
    variables: &Variables,
    is_directory: bool,
) -> Option<(PathBuf, bool)> {
    let segments: Vec<&str> = relative_path.split('/').collect();
    let (last, parents) = segments.split_last()?;

    let mut target = target_dir.to_path_buf();
    for parent in parents {
        let name = interpolate(get_actual_filename(parent), variables);
        if name.is_empty() {
            return None;
        }
        target.push(name);
    }

    let (name, is_template) = if is_directory {
        (interpolate(get_actual_filename(last), variables), false)
    } else {
        interpolate_filename(get_actual_filename(last), variables)
    };
    if name.is_empty() {
        return None;
    }
    target.push(name);

    Some((target, is_template))
}

fn is_below(relative_path: &str, directories: &[String]) -> bool {
    directories.iter().any(|dir| {
        relative_path.strip_prefix(dir.as_str()).is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Materializes `options.templates_dir` into `options.target_dir`.
///
/// # Errors
/// The first render, read or write failure aborts the run. Files written
/// before the failure stay on disk.
pub fn process_templates(
    options: &ProcessOptions<'_>,
    renderer: &dyn TemplateRenderer,
) -> Result<ProcessResult> {
    debug!("Processing templates from {}", options.templates_dir.display());

    let ignored = default_ignore_set()?;
    let mut result = ProcessResult::default();
    let mut skipped_directories: Vec<String> = Vec::new();

    for template_file in discover_template_files(options.templates_dir)? {
        let TemplateFile { relative_path, absolute_path, is_directory } = template_file;

        if ignored.is_match(&relative_path) {
            debug!("Ignoring template entry {relative_path}");
            continue;
        }

        if is_below(&relative_path, &skipped_directories) {
            debug!("Skipping {relative_path}: parent directory excluded");
            result.skipped_files.push(absolute_path);
            continue;
        }

        let filename = relative_path.rsplit('/').next().unwrap_or(&relative_path);
        if !should_include_conditional_file(filename, options.conditional_flags) {
            debug!("Skipping conditional entry {relative_path}");
            if is_directory {
                skipped_directories.push(relative_path);
            }
            result.skipped_files.push(absolute_path);
            continue;
        }

        let Some((target_path, is_template)) = resolve_target_path(
            &relative_path,
            options.target_dir,
            options.filename_variables,
            is_directory,
        ) else {
            debug!("Skipping {relative_path}: name interpolates to nothing");
            if is_directory {
                skipped_directories.push(relative_path);
            }
            result.skipped_files.push(absolute_path);
            continue;
        };

        if is_directory {
            debug!("Creating directory: {}", target_path.display());
            if !options.dry_run {
                fs::create_dir_all(&target_path)?;
            }
            result.created_directories.push(target_path);
            continue;
        }

        if is_template {
            debug!("Writing file: {}", target_path.display());
            let source = fs::read_to_string(&absolute_path)?;
            let content = renderer.render(&source, options.template_data).inspect_err(|e| {
                error!("Failed to render {}: {e}", absolute_path.display());
            })?;
            if !options.dry_run {
                write_file(&target_path, &content)?;
            }
        } else {
            debug!("Copying file: {}", target_path.display());
            if !options.dry_run {
                copy_file(&absolute_path, &target_path)?;
            }
        }
        result.created_files.push(target_path);
    }

    Ok(result)
}
