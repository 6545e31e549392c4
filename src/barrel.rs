//! Barrel (re-export) file updates.
//!
//! After an artifact is generated, each configured [`BarrelUpdate`] adds one
//! export line to a shared `index.ts`-style file, creating it if needed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::config::{BarrelPosition, BarrelUpdate};
use crate::constants::BARREL_HEADER;
use crate::error::Result;
use crate::interpolate::{interpolate, Variables};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static FROM_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"from\s+['"]([^'"]+)['"]"#).expect("valid regex"));
static NAMED_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s*\{\s*([^}]+)\s*\}").expect("valid regex"));

pub struct UpdateBarrelOptions<'a> {
    pub barrel_update: &'a BarrelUpdate,
    pub variables: &'a Variables,
    pub package_root: &'a Path,
    pub dry_run: bool,
}

/// Outcome of one barrel update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarrelUpdateResult {
    pub file_path: PathBuf,
    /// The barrel file did not exist and was (or would be) created
    pub created: bool,
    pub updated: bool,
    /// The export line was already present
    pub skipped: bool,
    /// The interpolated export line
    pub export_line: String,
}

fn normalize(line: &str) -> String {
    WHITESPACE.replace_all(line.trim(), " ").into_owned()
}

/// Returns the trimmed export statements in `content`.
pub fn parse_exports(content: &str) -> Vec<&str> {
    content.lines().map(str::trim).filter(|line| line.starts_with("export ")).collect()
}

/// True if an export equal to `export_line` up to whitespace exists in `content`.
pub fn export_exists(content: &str, export_line: &str) -> bool {
    let wanted = normalize(export_line);
    parse_exports(content).into_iter().any(|existing| normalize(existing) == wanted)
}

fn sort_key(export: &str) -> &str {
    if let Some(caps) = FROM_CLAUSE.captures(export) {
        if let Some(path) = caps.get(1) {
            return path.as_str();
        }
    }
    if let Some(caps) = NAMED_EXPORT.captures(export) {
        if let Some(names) = caps.get(1) {
            return names.as_str().trim();
        }
    }
    export
}

/// Inserts the export before the first line that is neither blank nor a `//` comment.
pub fn insert_prepend(content: &str, export_line: &str) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    let index = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("//")
        })
        .unwrap_or(lines.len());
    lines.insert(index, export_line.trim());
    lines.join("\n")
}

/// Appends the export after the existing content, ending with exactly one newline.
pub fn insert_append(content: &str, export_line: &str) -> String {
    format!("{}\n{}\n", content.trim_end(), export_line.trim())
}

/// Re-emits the leading comment block, then all exports sorted by module
/// path (or exported names), then any other non-blank content.
pub fn insert_alphabetically(content: &str, export_line: &str) -> String {
    let mut header_lines: Vec<&str> = Vec::new();
    let mut export_lines: Vec<&str> = Vec::new();
    let mut other_lines: Vec<&str> = Vec::new();
    let mut in_header = true;

    for line in content.split('\n') {
        let trimmed = line.trim();
        if in_header && (trimmed.starts_with("//") || trimmed.is_empty()) {
            header_lines.push(line);
            continue;
        }
        in_header = false;

        if trimmed.starts_with("export ") {
            export_lines.push(trimmed);
        } else if !trimmed.is_empty() {
            other_lines.push(line);
        }
    }

    // Blank lines closing the header collapse into one separator.
    let mut separated = false;
    while header_lines.last().is_some_and(|line| line.trim().is_empty()) {
        header_lines.pop();
        separated = true;
    }
    if separated && !header_lines.is_empty() {
        header_lines.push("");
    }

    export_lines.push(export_line.trim());
    export_lines.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

    let sections: Vec<String> = [header_lines, export_lines, other_lines]
        .into_iter()
        .filter(|section| !section.is_empty())
        .map(|section| section.join("\n"))
        .collect();
    format!("{}\n", sections.join("\n"))
}

/// Adds one export line to a barrel file.
///
/// # Errors
/// * `Error::IoError` if the barrel file cannot be read or written
pub fn update_barrel(options: &UpdateBarrelOptions<'_>) -> Result<BarrelUpdateResult> {
    let BarrelUpdate { file, template, position, skip_if_exists } = options.barrel_update;
    let file_path = options.package_root.join(file);
    let export_line = interpolate(template, options.variables);

    let mut result = BarrelUpdateResult {
        file_path: file_path.clone(),
        created: false,
        updated: false,
        skipped: false,
        export_line,
    };

    let content = if file_path.exists() {
        let content = fs::read_to_string(&file_path)?;
        if *skip_if_exists && export_exists(&content, &result.export_line) {
            debug!("Export already present in {}", file_path.display());
            result.skipped = true;
            return Ok(result);
        }
        content
    } else {
        result.created = true;
        BARREL_HEADER.to_string()
    };

    let new_content = match position {
        BarrelPosition::Append => insert_append(&content, &result.export_line),
        BarrelPosition::Prepend => insert_prepend(&content, &result.export_line),
        BarrelPosition::Alphabetical => insert_alphabetically(&content, &result.export_line),
    };

    if !options.dry_run {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, new_content)?;
    }
    debug!("Updated barrel {}", file_path.display());
    result.updated = true;
    Ok(result)
}

/// Applies several barrel updates in order.
///
/// A failing update is logged and skipped; the others still run, so the
/// returned results list every barrel that was (or would be) touched.
pub fn update_barrels(
    barrel_updates: &[BarrelUpdate],
    variables: &Variables,
    package_root: &Path,
    dry_run: bool,
) -> Vec<BarrelUpdateResult> {
    barrel_updates
        .iter()
        .filter_map(|barrel_update| {
            update_barrel(&UpdateBarrelOptions { barrel_update, variables, package_root, dry_run })
                .inspect_err(|e| warn!("Failed to update barrel {}: {e}", barrel_update.file))
                .ok()
        })
        .collect()
}
