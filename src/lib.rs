//! file-factory is a template-driven scaffolding engine for React packages.
//! It resolves layered configuration, materializes template trees into
//! components, hooks, contexts and pages, keeps barrel files up to date and
//! runs post-creation hooks.

/// Barrel (re-export) file updates
pub mod barrel;

/// Command-line interface module for the file-factory application
pub mod cli;

/// Configuration model with built-in defaults and partial layers
pub mod config;

pub mod constants;

/// Error types and handling for the file-factory application
pub mod error;

/// Component, hook, context and page generators
pub mod generators;

/// Post-creation lifecycle hooks
/// Runs closures and scripts in `.file-factory/hooks/`:
/// - after_component, after_hook, after_context, after_page
/// - after_create
pub mod hooks;

/// Ignore patterns applied while discovering templates
/// Skips `.DS_Store` and `Thumbs.db` entries
pub mod ignore;

/// `{{Name}}` placeholder interpolation and conditional file names
pub mod interpolate;

/// Configuration discovery, validation and layering
/// Supports YAML, JSON and TOML (`.file-factory/config.{yaml,yml,json,toml}`)
pub mod loader;

/// Case conversion and derived artifact names
pub mod naming;

/// Template tree materialization
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template content rendering
pub mod renderer;

pub mod schema;
