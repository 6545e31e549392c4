use std::path::PathBuf;

use serde_json::Value;

use crate::config::{BarrelUpdate, PostCreationMessage};
use crate::generators::{data_from, Generator, GeneratorOptions};
use crate::hooks::ArtifactType;
use crate::interpolate::{ConditionalFlags, Variables};
use crate::naming::{get_context_names, ContextNames};

/// Per-run overrides of the context configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    pub with_test: Option<bool>,
}

/// Creates a React context with its provider and consumer hook.
#[derive(Debug)]
pub struct ContextGenerator {
    options: GeneratorOptions,
    overrides: ContextOptions,
    names: ContextNames,
}

impl ContextGenerator {
    pub fn new(options: GeneratorOptions, overrides: ContextOptions) -> Self {
        Self { names: get_context_names(&options.name), options, overrides }
    }

    fn with_test(&self) -> bool {
        self.overrides.with_test.unwrap_or(self.options.config.context.with_test)
    }
}

impl Generator for ContextGenerator {
    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn artifact_type(&self) -> ArtifactType {
        ArtifactType::Context
    }

    fn template_type(&self) -> &'static str {
        "context"
    }

    fn target_directory(&self) -> PathBuf {
        PathBuf::from(&self.options.config.context.directory)
    }

    fn filename_variables(&self) -> Variables {
        self.names.to_variables()
    }

    fn template_data(&self) -> Value {
        let mut data = data_from(&self.names.to_variables());
        data.insert("withTest".to_string(), Value::Bool(self.with_test()));
        Value::Object(data)
    }

    fn conditional_flags(&self) -> ConditionalFlags {
        ConditionalFlags::from([("withTest".to_string(), self.with_test())])
    }

    fn post_creation_message(&self) -> Option<&PostCreationMessage> {
        self.options.config.context.post_creation_message.as_ref()
    }

    fn barrel_updates(&self) -> &[BarrelUpdate] {
        &self.options.config.context.update_barrels
    }

    fn message_variables(&self) -> Variables {
        Variables::from([
            ("ContextName".to_string(), self.names.context_name.clone()),
            ("ProviderName".to_string(), self.names.provider_name.clone()),
            ("consumerHookName".to_string(), self.names.consumer_hook_name.clone()),
        ])
    }
}
