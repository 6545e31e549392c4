use std::path::PathBuf;

use serde_json::Value;

use crate::config::{PostCreationMessage, Router};
use crate::error::Result;
use crate::generators::{ensure_absent, Generator, GeneratorOptions};
use crate::hooks::ArtifactType;
use crate::interpolate::{ConditionalFlags, Variables};
use crate::naming::{get_page_names, PageNames};

/// Per-run overrides of the page configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub router: Option<Router>,
}

/// Creates a page for the app router (`<path>/page.tsx`) or the pages
/// router (`<path>.tsx`). The artifact name is the route path.
#[derive(Debug)]
pub struct PageGenerator {
    options: GeneratorOptions,
    overrides: PageOptions,
    names: PageNames,
}

impl PageGenerator {
    pub fn new(options: GeneratorOptions, overrides: PageOptions) -> Self {
        Self { names: get_page_names(&options.name), options, overrides }
    }

    fn router(&self) -> Router {
        self.overrides.router.unwrap_or(self.options.config.page.router)
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.options.name.split('/').filter(|segment| !segment.is_empty())
    }
}

impl Generator for PageGenerator {
    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn artifact_type(&self) -> ArtifactType {
        ArtifactType::Page
    }

    fn template_type(&self) -> &'static str {
        match self.router() {
            Router::App => "page-app",
            Router::Pages => "page-pages",
        }
    }

    /// The route directory for the app router, the parent of the last
    /// segment for the pages router.
    fn target_directory(&self) -> PathBuf {
        let mut directory = PathBuf::from(&self.options.config.page.directory);
        let segments: Vec<&str> = self.segments().collect();
        let parents = match self.router() {
            Router::App => &segments[..],
            Router::Pages => &segments[..segments.len().saturating_sub(1)],
        };
        directory.extend(parents);
        directory
    }

    fn filename_variables(&self) -> Variables {
        Variables::from([
            ("pageName".to_string(), self.names.page_name.clone()),
            ("PageName".to_string(), self.names.pascal.clone()),
            ("pagePath".to_string(), self.names.path.clone()),
        ])
    }

    fn template_data(&self) -> Value {
        let mut data = match serde_json::to_value(&self.names) {
            Ok(Value::Object(data)) => data,
            _ => serde_json::Map::new(),
        };
        data.insert("router".to_string(), serde_json::json!(self.router()));
        Value::Object(data)
    }

    fn conditional_flags(&self) -> ConditionalFlags {
        let router = self.router();
        ConditionalFlags::from([
            ("isAppRouter".to_string(), router == Router::App),
            ("isPagesRouter".to_string(), router == Router::Pages),
        ])
    }

    fn post_creation_message(&self) -> Option<&PostCreationMessage> {
        self.options.config.page.post_creation_message.as_ref()
    }

    /// Checks the file the templates will write, built from the same
    /// segments as [`Generator::target_directory`].
    fn validate(&self) -> Result<()> {
        let target_dir = self.options.package_root.join(self.target_directory());
        let page_path = match self.router() {
            Router::App => target_dir.join("page.tsx"),
            Router::Pages => target_dir.join(format!("{}.tsx", self.names.page_name)),
        };
        ensure_absent(ArtifactType::Page, &page_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileFactoryConfig;
    use crate::hooks::HookRegistry;

    fn generator(name: &str, router: Router) -> PageGenerator {
        let options = GeneratorOptions {
            name: name.to_string(),
            package_root: PathBuf::from("/pkg"),
            workspace_root: None,
            config: FileFactoryConfig::default(),
            dry_run: true,
            builtin_templates_dir: PathBuf::from("/templates"),
            hooks: HookRegistry::new(),
        };
        PageGenerator::new(options, PageOptions { router: Some(router) })
    }

    #[test]
    fn test_target_directory_per_router() {
        assert_eq!(
            generator("dashboard/settings", Router::App).target_directory(),
            PathBuf::from("src/pages/dashboard/settings")
        );
        assert_eq!(
            generator("dashboard/settings", Router::Pages).target_directory(),
            PathBuf::from("src/pages/dashboard")
        );
        assert_eq!(generator("about", Router::Pages).target_directory(), PathBuf::from("src/pages"));
    }

    #[test]
    fn test_flags_and_data() {
        let page = generator("user-profile", Router::App);
        assert_eq!(page.template_type(), "page-app");
        assert_eq!(page.conditional_flags()["isAppRouter"], true);
        let data = page.template_data();
        assert_eq!(data["PageName"], "UserProfile");
        assert_eq!(data["pageTitle"], "User Profile");
        assert_eq!(data["router"], "app");
    }
}
