use std::path::PathBuf;

use serde_json::Value;

use crate::config::{BarrelUpdate, PostCreationMessage, StyleSystem};
use crate::generators::{data_from, Generator, GeneratorOptions};
use crate::hooks::ArtifactType;
use crate::interpolate::{ConditionalFlags, Variables};
use crate::naming::{get_component_names, get_context_names, ComponentNames, ContextNames};

/// Per-run overrides of the component configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentOptions {
    /// Generate a component-scoped context next to the component
    pub with_context: bool,
    pub with_test: Option<bool>,
    pub with_story: Option<bool>,
    pub style_system: Option<StyleSystem>,
}

/// Creates React components with optional styles, tests, stories and a
/// component-scoped context.
#[derive(Debug)]
pub struct ComponentGenerator {
    options: GeneratorOptions,
    overrides: ComponentOptions,
    names: ComponentNames,
    context_names: ContextNames,
}

impl ComponentGenerator {
    pub fn new(options: GeneratorOptions, overrides: ComponentOptions) -> Self {
        Self {
            names: get_component_names(&options.name),
            context_names: get_context_names(&options.name),
            options,
            overrides,
        }
    }

    fn style_system(&self) -> StyleSystem {
        self.overrides.style_system.unwrap_or(self.options.config.component.style_system)
    }

    fn with_test(&self) -> bool {
        self.overrides.with_test.unwrap_or(self.options.config.component.with_test)
    }

    fn with_story(&self) -> bool {
        self.overrides.with_story.unwrap_or(self.options.config.component.with_story)
    }
}

impl Generator for ComponentGenerator {
    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn artifact_type(&self) -> ArtifactType {
        ArtifactType::Component
    }

    fn template_type(&self) -> &'static str {
        if self.overrides.with_context {
            "component-with-context"
        } else {
            "component"
        }
    }

    fn target_directory(&self) -> PathBuf {
        PathBuf::from(&self.options.config.component.directory)
    }

    fn filename_variables(&self) -> Variables {
        let mut variables = self.names.to_variables();
        if self.overrides.with_context {
            variables.insert("ContextName".to_string(), self.context_names.context_name.clone());
            variables.insert("ProviderName".to_string(), self.context_names.provider_name.clone());
        }
        variables
    }

    fn template_data(&self) -> Value {
        let mut data = data_from(&self.names.to_variables());
        data.extend(data_from(&self.context_names.to_variables()));
        data.insert("styleSystem".to_string(), serde_json::json!(self.style_system()));
        data.insert("withContext".to_string(), Value::Bool(self.overrides.with_context));
        data.insert("withTest".to_string(), Value::Bool(self.with_test()));
        data.insert("withStory".to_string(), Value::Bool(self.with_story()));
        data.insert(
            "appRouterBarrel".to_string(),
            Value::Bool(self.options.config.component.app_router_barrel),
        );
        Value::Object(data)
    }

    fn conditional_flags(&self) -> ConditionalFlags {
        let style_system = self.style_system();
        ConditionalFlags::from([
            ("withTest".to_string(), self.with_test()),
            ("withStory".to_string(), self.with_story()),
            ("withCssModules".to_string(), style_system == StyleSystem::CssModules),
            ("withStyledComponents".to_string(), style_system == StyleSystem::StyledComponents),
            ("withTailwind".to_string(), style_system == StyleSystem::Tailwind),
            ("withStyles".to_string(), style_system != StyleSystem::None),
        ])
    }

    fn post_creation_message(&self) -> Option<&PostCreationMessage> {
        self.options.config.component.post_creation_message.as_ref()
    }

    fn barrel_updates(&self) -> &[BarrelUpdate] {
        &self.options.config.component.update_barrels
    }

    fn barrel_variables(&self) -> Variables {
        let mut variables = self.names.to_variables();
        variables.insert("ContextName".to_string(), self.context_names.context_name.clone());
        variables.insert("ProviderName".to_string(), self.context_names.provider_name.clone());
        variables
            .insert("consumerHookName".to_string(), self.context_names.consumer_hook_name.clone());
        variables
    }
}
