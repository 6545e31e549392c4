//! Command-line interface for file-factory.
//! Provides argument parsing with clap and turns a parsed command into a
//! generator run.

use std::path::{Path, PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use log::{debug, info};

use crate::config::{Router, StyleSystem};
use crate::constants::{CONFIG_DIR, HOOKS_DIR};
use crate::error::{Error, Result};
use crate::generators::{
    create_generator_options, ComponentGenerator, ComponentOptions, ContextGenerator,
    ContextOptions, Generator, GeneratorOptions, GeneratorResult, HookGenerator, HookOptions,
    PageGenerator, PageOptions,
};
use crate::hooks::{ArtifactType, HookRegistry};
use crate::loader::{find_workspace_root, resolve_config, resolve_package_dir, ResolveOptions};
use crate::naming::to_pascal_case;
use crate::prompt::{confirm_hooks_execution, Prompter};

/// Command-line arguments structure for file-factory.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "file-factory: template-driven scaffolding for components, hooks, contexts and pages",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Package to generate into: a name, a workspace path such as
    /// `apps/web`, or a relative or absolute directory
    #[arg(short, long, global = true, value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Show what would be generated without writing any files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip the confirmation prompt before running hook scripts found in
    /// `.file-factory/hooks/`.
    #[arg(long, global = true)]
    pub skip_hooks_check: bool,
}

/// `--with-test` / `--no-test`; the last one given wins.
#[derive(clap::Args, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TestFlags {
    /// Generate a test file
    #[arg(long, overrides_with = "no_test")]
    pub with_test: bool,

    /// Do not generate a test file
    #[arg(long, overrides_with = "with_test")]
    pub no_test: bool,
}

impl TestFlags {
    /// The explicit choice, or `None` to use the configuration.
    pub fn value(self) -> Option<bool> {
        flag_pair(self.with_test, self.no_test)
    }
}

#[derive(clap::Args, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoryFlags {
    /// Generate a Storybook story
    #[arg(long, overrides_with = "no_story")]
    pub with_story: bool,

    /// Do not generate a Storybook story
    #[arg(long, overrides_with = "with_story")]
    pub no_story: bool,
}

impl StoryFlags {
    pub fn value(self) -> Option<bool> {
        flag_pair(self.with_story, self.no_story)
    }
}

fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a React component
    Component {
        /// Component name in any case style
        name: Option<String>,
        /// Also generate a component-scoped context and provider
        #[arg(long)]
        with_context: bool,
        #[command(flatten)]
        test: TestFlags,
        #[command(flatten)]
        story: StoryFlags,
        /// Styling approach, overriding the configured one
        #[arg(long, value_enum)]
        style: Option<StyleSystem>,
    },
    /// Create a custom hook
    Hook {
        /// Hook name; a `use` prefix is added when missing
        name: Option<String>,
        /// Write a single file instead of a hook directory
        #[arg(long)]
        flat_file: bool,
        #[command(flatten)]
        test: TestFlags,
    },
    /// Create a React context with provider and consumer hook
    Context {
        /// Context name; a trailing `Context` or `Provider` is ignored
        name: Option<String>,
        #[command(flatten)]
        test: TestFlags,
    },
    /// Create a page
    Page {
        /// Route path such as `dashboard/settings`
        path: Option<String>,
        /// Router layout, overriding the configured one
        #[arg(long, value_enum)]
        router: Option<Router>,
    },
    /// Choose what to create interactively
    Create,
}

impl Commands {
    fn artifact_type(&self) -> Option<ArtifactType> {
        match self {
            Commands::Component { .. } => Some(ArtifactType::Component),
            Commands::Hook { .. } => Some(ArtifactType::Hook),
            Commands::Context { .. } => Some(ArtifactType::Context),
            Commands::Page { .. } => Some(ArtifactType::Page),
            Commands::Create => None,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            Commands::Component { name, .. }
            | Commands::Hook { name, .. }
            | Commands::Context { name, .. }
            | Commands::Page { path: name, .. } => name.as_deref(),
            Commands::Create => None,
        }
    }

    /// The command for `artifact_type` with every option left to the configuration.
    fn default_for(artifact_type: ArtifactType) -> Self {
        match artifact_type {
            ArtifactType::Component => Commands::Component {
                name: None,
                with_context: false,
                test: TestFlags::default(),
                story: StoryFlags::default(),
                style: None,
            },
            ArtifactType::Hook => {
                Commands::Hook { name: None, flat_file: false, test: TestFlags::default() }
            }
            ArtifactType::Context => Commands::Context { name: None, test: TestFlags::default() },
            ArtifactType::Page => Commands::Page { path: None, router: None },
        }
    }

    fn into_generator(self, options: GeneratorOptions) -> Option<Box<dyn Generator>> {
        let generator: Box<dyn Generator> = match self {
            Commands::Component { with_context, test, story, style, .. } => {
                Box::new(ComponentGenerator::new(
                    options,
                    ComponentOptions {
                        with_context,
                        with_test: test.value(),
                        with_story: story.value(),
                        style_system: style,
                    },
                ))
            }
            Commands::Hook { flat_file, test, .. } => Box::new(HookGenerator::new(
                options,
                HookOptions { with_test: test.value(), flat_file: flat_file.then_some(true) },
            )),
            Commands::Context { test, .. } => {
                Box::new(ContextGenerator::new(options, ContextOptions { with_test: test.value() }))
            }
            Commands::Page { router, .. } => {
                Box::new(PageGenerator::new(options, PageOptions { router }))
            }
            Commands::Create => return None,
        };
        Some(generator)
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::MissingSubcommand | ErrorKind::MissingRequiredArgument)
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// What a finished CLI run generated.
#[derive(Debug)]
pub struct Outcome {
    pub artifact_type: ArtifactType,
    pub name: String,
    pub package_root: PathBuf,
    pub result: GeneratorResult,
}

const ARTIFACT_CHOICES: [ArtifactType; 4] =
    [ArtifactType::Component, ArtifactType::Hook, ArtifactType::Context, ArtifactType::Page];

/// Resolves `--package` to a package directory.
///
/// Inside a workspace the specifier may be a package name or a workspace
/// path; outside one it must be an existing directory.
///
/// # Errors
/// * `Error::PackageNotFoundError` if the specifier matches nothing
pub fn resolve_package_root(specifier: Option<&str>) -> Result<Option<PathBuf>> {
    let Some(specifier) = specifier else {
        return Ok(None);
    };
    let cwd = std::env::current_dir()?;

    let resolved = match find_workspace_root(&cwd) {
        Some(workspace_root) => resolve_package_dir(specifier, workspace_root),
        None => Some(cwd.join(specifier)).filter(|path| path.is_dir()),
    };

    resolved
        .map(Some)
        .ok_or_else(|| Error::PackageNotFoundError { package: specifier.to_string() })
}

/// Collects hook scripts from the workspace root, then the package root.
/// A package script replaces the workspace script of the same slot.
pub fn discover_hooks(package_root: &Path, workspace_root: Option<&Path>) -> HookRegistry {
    let mut registry = HookRegistry::new();
    if let Some(workspace_root) = workspace_root {
        registry.discover(workspace_root.join(CONFIG_DIR).join(HOOKS_DIR));
    }
    if workspace_root != Some(package_root) {
        let mut package_hooks = HookRegistry::new();
        package_hooks.discover(package_root.join(CONFIG_DIR).join(HOOKS_DIR));
        registry.overlay(package_hooks);
    }
    registry
}

/// Runs one CLI invocation: resolves the package and its configuration,
/// asks for anything missing and runs the matching generator.
///
/// # Errors
/// * `Error::PackageNotFoundError` if `--package` cannot be resolved
/// * `Error::PromptError` if an interactive prompt fails
/// * Any error of [`Generator::run`]
pub fn execute(args: Args, prompter: &dyn Prompter) -> Result<Outcome> {
    let package_root = resolve_package_root(args.package.as_deref())?;
    let resolved = resolve_config(ResolveOptions { package_root, workspace_root: None })?;
    debug!("Resolved package root {}", resolved.package_root.display());

    let command = match args.command {
        Commands::Create => {
            let labels: Vec<String> = ARTIFACT_CHOICES.iter().map(ToString::to_string).collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let index = prompter.select("What do you want to create?", &labels)?;
            let artifact_type = ARTIFACT_CHOICES
                .get(index)
                .copied()
                .ok_or_else(|| Error::PromptError(format!("invalid selection {index}")))?;
            Commands::default_for(artifact_type)
        }
        command => command,
    };
    let Some(artifact_type) = command.artifact_type() else {
        return Err(Error::ValidationError("No artifact type selected".to_string()));
    };

    let name = match command.name() {
        Some(name) => name.to_string(),
        None => prompter.input(&format!("{} name", to_pascal_case(&artifact_type.to_string())))?,
    };

    let mut hooks = discover_hooks(&resolved.package_root, resolved.workspace_root.as_deref());
    if hooks.has_script_hooks()
        && !args.dry_run
        && !confirm_hooks_execution(prompter, args.skip_hooks_check)?
    {
        info!("Hook scripts will not be run");
        hooks = HookRegistry::new();
    }

    let package_root = resolved.package_root.clone();
    let mut options = create_generator_options(name.clone(), resolved, hooks);
    options.dry_run = args.dry_run;

    let generator = command
        .into_generator(options)
        .ok_or_else(|| Error::ValidationError("No artifact type selected".to_string()))?;
    let result = generator.run()?;

    Ok(Outcome { artifact_type, name, package_root, result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_pair() {
        assert_eq!(flag_pair(false, false), None);
        assert_eq!(flag_pair(true, false), Some(true));
        assert_eq!(flag_pair(false, true), Some(false));
    }

    #[test]
    fn test_default_commands_have_no_name() {
        for artifact_type in ARTIFACT_CHOICES {
            let command = Commands::default_for(artifact_type);
            assert_eq!(command.artifact_type(), Some(artifact_type));
            assert_eq!(command.name(), None);
        }
    }
}
