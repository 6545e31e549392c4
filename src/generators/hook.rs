use std::path::PathBuf;

use serde_json::json;

use crate::config::{BarrelUpdate, PostCreationMessage};
use crate::error::Result;
use crate::generators::{ensure_absent, Generator, GeneratorOptions};
use crate::hooks::ArtifactType;
use crate::interpolate::{ConditionalFlags, Variables};
use crate::naming::{normalize_hook_name, to_kebab_case};

/// Per-run overrides of the hook configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HookOptions {
    pub with_test: Option<bool>,
    /// Write `useX.ts` directly into the hooks directory instead of `useX/`
    pub flat_file: Option<bool>,
}

/// Creates custom React hooks, as a directory or a flat file.
#[derive(Debug)]
pub struct HookGenerator {
    options: GeneratorOptions,
    overrides: HookOptions,
    hook_name: String,
}

impl HookGenerator {
    pub fn new(options: GeneratorOptions, overrides: HookOptions) -> Self {
        Self { hook_name: normalize_hook_name(&options.name), options, overrides }
    }

    fn use_directory(&self) -> bool {
        match self.overrides.flat_file {
            Some(flat_file) => !flat_file,
            None => self.options.config.hook.use_directory,
        }
    }

    fn with_test(&self) -> bool {
        self.overrides.with_test.unwrap_or(self.options.config.hook.with_test)
    }
}

impl Generator for HookGenerator {
    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn artifact_type(&self) -> ArtifactType {
        ArtifactType::Hook
    }

    fn template_type(&self) -> &'static str {
        if self.use_directory() {
            "hook-with-directory"
        } else {
            "hook"
        }
    }

    fn target_directory(&self) -> PathBuf {
        PathBuf::from(&self.options.config.hook.directory)
    }

    fn filename_variables(&self) -> Variables {
        Variables::from([
            ("hookName".to_string(), self.hook_name.clone()),
            ("hook-name".to_string(), to_kebab_case(&self.hook_name)),
        ])
    }

    fn template_data(&self) -> serde_json::Value {
        json!({
            "hookName": self.hook_name,
            "withTest": self.with_test(),
            "useDirectory": self.use_directory(),
        })
    }

    fn conditional_flags(&self) -> ConditionalFlags {
        ConditionalFlags::from([("withTest".to_string(), self.with_test())])
    }

    fn post_creation_message(&self) -> Option<&PostCreationMessage> {
        self.options.config.hook.post_creation_message.as_ref()
    }

    fn barrel_updates(&self) -> &[BarrelUpdate] {
        &self.options.config.hook.update_barrels
    }

    /// A directory hook collides with `<dir>/useX`, a flat hook with `<dir>/useX.ts`.
    fn validate(&self) -> Result<()> {
        let target_dir = self.options.package_root.join(self.target_directory());
        let hook_path = if self.use_directory() {
            target_dir.join(&self.hook_name)
        } else {
            target_dir.join(format!("{}.ts", self.hook_name))
        };
        ensure_absent(ArtifactType::Hook, &hook_path)
    }
}
