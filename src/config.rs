//! Configuration model for file-factory.
//!
//! [`FileFactoryConfig`] is always fully populated: its `Default` carries the
//! built-in settings and every config layer arrives as a [`PartialConfig`]
//! that overrides only the fields it sets.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Styling approach used by generated components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StyleSystem {
    #[default]
    CssModules,
    StyledComponents,
    Tailwind,
    None,
}

/// Router flavour that decides the page file layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Router {
    App,
    #[default]
    Pages,
}

/// Where a new export line goes in a barrel file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrelPosition {
    #[default]
    Append,
    Prepend,
    Alphabetical,
}

fn default_true() -> bool {
    true
}

/// One export line to add to a barrel file after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrelUpdate {
    /// Path to the barrel file relative to the package root
    pub file: String,
    /// Export line with `{{Variable}}` placeholders
    pub template: String,
    #[serde(default)]
    pub position: BarrelPosition,
    #[serde(default = "default_true")]
    pub skip_if_exists: bool,
}

/// Text shown after a successful run; supports `{{Variable}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreationMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    pub directory: String,
    pub style_system: StyleSystem,
    pub with_test: bool,
    pub with_story: bool,
    /// Barrel exports only the default export (`export { default }`)
    pub app_router_barrel: bool,
    pub update_barrels: Vec<BarrelUpdate>,
    pub post_creation_message: Option<PostCreationMessage>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            directory: "src/components".to_string(),
            style_system: StyleSystem::CssModules,
            with_test: true,
            with_story: false,
            app_router_barrel: true,
            update_barrels: Vec::new(),
            post_creation_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    pub directory: String,
    pub with_test: bool,
    /// Each hook gets its own directory instead of a flat file
    pub use_directory: bool,
    pub update_barrels: Vec<BarrelUpdate>,
    pub post_creation_message: Option<PostCreationMessage>,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            directory: "src/hooks".to_string(),
            with_test: true,
            use_directory: true,
            update_barrels: Vec::new(),
            post_creation_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub directory: String,
    pub with_test: bool,
    pub update_barrels: Vec<BarrelUpdate>,
    pub post_creation_message: Option<PostCreationMessage>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            directory: "src/contexts".to_string(),
            with_test: false,
            update_barrels: Vec::new(),
            post_creation_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub directory: String,
    pub router: Router,
    pub post_creation_message: Option<PostCreationMessage>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            directory: "src/pages".to_string(),
            router: Router::Pages,
            post_creation_message: None,
        }
    }
}

/// Fully resolved configuration, one section per artifact kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFactoryConfig {
    pub component: ComponentConfig,
    pub hook: HookConfig,
    pub context: ContextConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialComponentConfig {
    pub directory: Option<String>,
    pub style_system: Option<StyleSystem>,
    pub with_test: Option<bool>,
    pub with_story: Option<bool>,
    pub app_router_barrel: Option<bool>,
    pub update_barrels: Option<Vec<BarrelUpdate>>,
    pub post_creation_message: Option<PostCreationMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialHookConfig {
    pub directory: Option<String>,
    pub with_test: Option<bool>,
    pub use_directory: Option<bool>,
    pub update_barrels: Option<Vec<BarrelUpdate>>,
    pub post_creation_message: Option<PostCreationMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialContextConfig {
    pub directory: Option<String>,
    pub with_test: Option<bool>,
    pub update_barrels: Option<Vec<BarrelUpdate>>,
    pub post_creation_message: Option<PostCreationMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialPageConfig {
    pub directory: Option<String>,
    pub router: Option<Router>,
    pub post_creation_message: Option<PostCreationMessage>,
}

/// One configuration layer as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub component: Option<PartialComponentConfig>,
    pub hook: Option<PartialHookConfig>,
    pub context: Option<PartialContextConfig>,
    pub page: Option<PartialPageConfig>,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl ComponentConfig {
    fn apply(&mut self, layer: PartialComponentConfig) {
        set(&mut self.directory, layer.directory);
        set(&mut self.style_system, layer.style_system);
        set(&mut self.with_test, layer.with_test);
        set(&mut self.with_story, layer.with_story);
        set(&mut self.app_router_barrel, layer.app_router_barrel);
        set(&mut self.update_barrels, layer.update_barrels);
        set(&mut self.post_creation_message, layer.post_creation_message.map(Some));
    }
}

impl HookConfig {
    fn apply(&mut self, layer: PartialHookConfig) {
        set(&mut self.directory, layer.directory);
        set(&mut self.with_test, layer.with_test);
        set(&mut self.use_directory, layer.use_directory);
        set(&mut self.update_barrels, layer.update_barrels);
        set(&mut self.post_creation_message, layer.post_creation_message.map(Some));
    }
}

impl ContextConfig {
    fn apply(&mut self, layer: PartialContextConfig) {
        set(&mut self.directory, layer.directory);
        set(&mut self.with_test, layer.with_test);
        set(&mut self.update_barrels, layer.update_barrels);
        set(&mut self.post_creation_message, layer.post_creation_message.map(Some));
    }
}

impl PageConfig {
    fn apply(&mut self, layer: PartialPageConfig) {
        set(&mut self.directory, layer.directory);
        set(&mut self.router, layer.router);
        set(&mut self.post_creation_message, layer.post_creation_message.map(Some));
    }
}

impl FileFactoryConfig {
    /// Overrides every field the layer sets. `update_barrels` lists are
    /// replaced, never concatenated.
    pub fn merge(&mut self, layer: PartialConfig) {
        if let Some(component) = layer.component {
            self.component.apply(component);
        }
        if let Some(hook) = layer.hook {
            self.hook.apply(hook);
        }
        if let Some(context) = layer.context {
            self.context.apply(context);
        }
        if let Some(page) = layer.page {
            self.page.apply(page);
        }
    }

    /// Returns the configuration with `layer` merged on top.
    pub fn merged(mut self, layer: PartialConfig) -> Self {
        self.merge(layer);
        self
    }
}
