//! Error handling for file-factory.
//! Defines the error type and result alias used throughout the crate.

use thiserror::Error;

/// Errors that can occur while resolving configuration or generating artifacts.
///
/// Configuration problems in a single layer are not represented here: the
/// resolver logs them and treats the layer as empty. Everything below fails
/// the current generation run.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur while rendering template contents
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur while walking a template directory
    #[error("Template discovery error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents validation failures of generator input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The artifact's target path already exists and would be overwritten
    #[error("{artifact} already exists at: {path}")]
    ArtifactExistsError { artifact: String, path: String },

    /// No template directory exists for the requested template type
    #[error("No templates found for type: {template_type}")]
    TemplatesNotFoundError { template_type: String },

    /// A `--package` specifier could not be resolved to a directory
    #[error("Could not find package: {package}")]
    PackageNotFoundError { package: String },

    /// Represents errors that occur during hook script execution
    #[error("Hook execution error: {0}.")]
    HookError(String),

    /// Represents errors raised by interactive prompts
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
