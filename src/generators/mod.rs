//! Artifact generators.
//!
//! A generator is a thin layer over the template engine: it supplies the
//! target directory, the template type and the variables for one artifact
//! kind. [`Generator::run`] drives a generation from validation to hooks.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::barrel::{update_barrels, BarrelUpdateResult};
use crate::config::{BarrelUpdate, FileFactoryConfig, PostCreationMessage};
use crate::error::{Error, Result};
use crate::hooks::{run_hooks, ArtifactCreationResult, ArtifactType, HookRegistry};
use crate::interpolate::{interpolate, ConditionalFlags, Variables};
use crate::loader::{builtin_templates_dir, find_templates_dir, ResolvedConfig};
use crate::naming::to_pascal_case;
use crate::processor::{process_templates, ProcessOptions};
use crate::renderer::MiniJinjaRenderer;

pub mod component;
pub mod context;
pub mod hook;
pub mod page;

pub use component::{ComponentGenerator, ComponentOptions};
pub use context::{ContextGenerator, ContextOptions};
pub use hook::{HookGenerator, HookOptions};
pub use page::{PageGenerator, PageOptions};

/// Options shared by every generator.
#[derive(Debug)]
pub struct GeneratorOptions {
    /// Name of the artifact as given by the user
    pub name: String,
    pub package_root: PathBuf,
    pub workspace_root: Option<PathBuf>,
    pub config: FileFactoryConfig,
    /// Report what would be generated without writing anything
    pub dry_run: bool,
    /// Last-resort template location
    pub builtin_templates_dir: PathBuf,
    pub hooks: HookRegistry,
}

/// Builds generator options from a resolved configuration.
pub fn create_generator_options<S: Into<String>>(
    name: S,
    resolved: ResolvedConfig,
    hooks: HookRegistry,
) -> GeneratorOptions {
    GeneratorOptions {
        name: name.into(),
        package_root: resolved.package_root,
        workspace_root: resolved.workspace_root,
        config: resolved.config,
        dry_run: false,
        builtin_templates_dir: builtin_templates_dir(),
        hooks,
    }
}

/// Everything a successful run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeneratorResult {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub skipped_files: Vec<PathBuf>,
    pub barrels: Vec<BarrelUpdateResult>,
    /// The interpolated post-creation message, if one is configured
    pub message: Option<String>,
}

/// Turns string variables into template data.
pub(crate) fn data_from(variables: &Variables) -> Map<String, Value> {
    variables.iter().map(|(key, value)| (key.clone(), Value::String(value.clone()))).collect()
}

/// Fails with `ArtifactExistsError` if `path` already exists.
pub(crate) fn ensure_absent(artifact_type: ArtifactType, path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::ArtifactExistsError {
            artifact: to_pascal_case(&artifact_type.to_string()),
            path: path.display().to_string(),
        });
    }
    Ok(())
}

pub trait Generator {
    fn options(&self) -> &GeneratorOptions;

    fn artifact_type(&self) -> ArtifactType;

    /// Name of the template set, e.g. `component` or `page-app`.
    fn template_type(&self) -> &'static str;

    /// Output directory relative to the package root.
    fn target_directory(&self) -> PathBuf;

    /// Variables for file names. The first entry is the artifact's primary name.
    fn filename_variables(&self) -> Variables;

    fn template_data(&self) -> Value;

    fn conditional_flags(&self) -> ConditionalFlags;

    fn post_creation_message(&self) -> Option<&PostCreationMessage>;

    fn barrel_updates(&self) -> &[BarrelUpdate] {
        &[]
    }

    fn barrel_variables(&self) -> Variables {
        self.filename_variables()
    }

    fn message_variables(&self) -> Variables {
        self.filename_variables()
    }

    /// Checks that a name was given and that the artifact does not exist yet.
    ///
    /// # Errors
    /// * `Error::ValidationError` if the primary name is empty
    /// * `Error::ArtifactExistsError` if `<target>/<primary name>` exists
    fn validate(&self) -> Result<()> {
        let variables = self.filename_variables();
        let primary_name = variables.values().next().map(String::as_str).unwrap_or_default();
        if primary_name.is_empty() {
            return Err(Error::ValidationError("No name provided".to_string()));
        }

        let artifact_path =
            self.options().package_root.join(self.target_directory()).join(primary_name);
        ensure_absent(self.artifact_type(), &artifact_path)
    }

    /// Validates, materializes the templates, updates barrels, shows the
    /// post-creation message and finally runs the lifecycle hooks.
    ///
    /// Barrel and hook failures are logged and do not fail the run.
    fn run(&self) -> Result<GeneratorResult> {
        let options = self.options();
        self.validate()?;

        let templates_dir = find_templates_dir(
            self.template_type(),
            &options.package_root,
            options.workspace_root.as_deref(),
            &options.builtin_templates_dir,
        )?;
        debug!("Using templates from: {}", templates_dir.display());

        let target_dir = options.package_root.join(self.target_directory());
        let filename_variables = self.filename_variables();
        let template_data = self.template_data();
        let conditional_flags = self.conditional_flags();
        let renderer = MiniJinjaRenderer::new();

        let processed = process_templates(
            &ProcessOptions {
                templates_dir: &templates_dir,
                target_dir: &target_dir,
                filename_variables: &filename_variables,
                template_data: &template_data,
                conditional_flags: &conditional_flags,
                dry_run: options.dry_run,
            },
            &renderer,
        )?;
        info!("Generated {} file(s) for {}", processed.created_files.len(), options.name);

        let barrels = update_barrels(
            self.barrel_updates(),
            &self.barrel_variables(),
            &options.package_root,
            options.dry_run,
        );

        let message = self
            .post_creation_message()
            .map(|post| interpolate(&post.message, &self.message_variables()));
        if let Some(message) = &message {
            println!("\nNext steps:\n{}\n{message}\n{}\n", "-".repeat(40), "-".repeat(40));
        }

        if options.dry_run {
            debug!("Dry run, skipping lifecycle hooks");
        } else {
            let creation = ArtifactCreationResult {
                artifact_type: self.artifact_type(),
                name: options.name.clone(),
                files: processed.created_files.clone(),
                package_root: options.package_root.clone(),
            };
            let failures = run_hooks(&options.hooks, &creation);
            if failures > 0 {
                warn!("{failures} lifecycle hook(s) failed");
            }
        }

        Ok(GeneratorResult {
            files: processed.created_files,
            directories: processed.created_directories,
            skipped_files: processed.skipped_files,
            barrels,
            message,
        })
    }
}
