//! Naming utilities for converting between case styles and deriving the
//! name sets each artifact kind interpolates into filenames and templates.
//!
//! Hyphens, underscores and camelCase boundaries are all treated as word
//! separators, so any case variant of a name converges on the same
//! PascalCase base.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::interpolate::Variables;

static PASCAL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("valid regex"));
static HOOK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^use").expect("valid regex"));
static CONTEXT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)context$").expect("valid regex"));
static PROVIDER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)provider$").expect("valid regex"));
/// A word is an optional capital followed by anything but capitals and separators.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]?[^A-Z\-_\s]*").expect("valid regex"));
static CAPITAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])").expect("valid regex"));

/// Splits a name into words at hyphens, underscores, whitespace and before
/// every capital letter, so `hTTPClient` yields `h`, `T`, `T`, `P`, `Client`.
fn words(name: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(name).map(|word| word.as_str()).filter(|word| !word.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Converts a string to PascalCase.
///
/// ```
/// use file_factory::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("my-component"), "MyComponent");
/// assert_eq!(to_pascal_case("myComponent"), "MyComponent");
/// assert_eq!(to_pascal_case("my_component"), "MyComponent");
/// assert_eq!(to_pascal_case("aBTest"), "ABTest");
/// ```
pub fn to_pascal_case(name: &str) -> String {
    if PASCAL_CASE.is_match(name) {
        return name.to_string();
    }
    words(name).map(capitalize).collect()
}

/// Converts a string to camelCase.
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a string to kebab-case.
///
/// Every capital starts a new word, so acronyms are spelled out letter by
/// letter (`ABTest` becomes `a-b-test`) and convert back unchanged.
pub fn to_kebab_case(name: &str) -> String {
    words(name).map(str::to_lowercase).collect::<Vec<_>>().join("-")
}

/// Converts a string to snake_case, splitting words like [`to_kebab_case`].
pub fn to_snake_case(name: &str) -> String {
    words(name).map(str::to_lowercase).collect::<Vec<_>>().join("_")
}

/// Ensures a hook name carries exactly one `use` prefix.
///
/// ```
/// use file_factory::naming::normalize_hook_name;
///
/// assert_eq!(normalize_hook_name("Debounce"), "useDebounce");
/// assert_eq!(normalize_hook_name("useDebounce"), "useDebounce");
/// assert_eq!(normalize_hook_name("UseDebounce"), "useDebounce");
/// ```
pub fn normalize_hook_name(name: &str) -> String {
    let base = HOOK_PREFIX.replace(name, "");
    format!("use{}", to_pascal_case(&base))
}

/// Names derived for a React context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextNames {
    #[serde(rename = "ContextName")]
    pub context_name: String,
    #[serde(rename = "ProviderName")]
    pub provider_name: String,
    #[serde(rename = "consumerHookName")]
    pub consumer_hook_name: String,
    #[serde(rename = "contextDisplayName")]
    pub context_display_name: String,
    #[serde(rename = "baseName")]
    pub base_name: String,
}

impl ContextNames {
    pub fn to_variables(&self) -> Variables {
        Variables::from([
            ("ContextName".to_string(), self.context_name.clone()),
            ("ProviderName".to_string(), self.provider_name.clone()),
            ("consumerHookName".to_string(), self.consumer_hook_name.clone()),
            ("contextDisplayName".to_string(), self.context_display_name.clone()),
            ("baseName".to_string(), self.base_name.clone()),
        ])
    }
}

/// Derives context names, ignoring a trailing `Context` or `Provider`.
///
/// `Theme`, `ThemeContext` and `ThemeProvider` all produce the same record.
pub fn get_context_names(name: &str) -> ContextNames {
    let without_context = CONTEXT_SUFFIX.replace(name, "");
    let without_provider = PROVIDER_SUFFIX.replace(&without_context, "");
    let base_name = to_pascal_case(&without_provider);

    ContextNames {
        context_name: format!("{base_name}Context"),
        provider_name: format!("{base_name}Provider"),
        consumer_hook_name: format!("use{base_name}"),
        context_display_name: base_name.clone(),
        base_name,
    }
}

/// Names derived for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentNames {
    #[serde(rename = "ComponentName")]
    pub pascal: String,
    #[serde(rename = "componentName")]
    pub camel: String,
    #[serde(rename = "component-name")]
    pub kebab: String,
}

impl ComponentNames {
    /// Variables in the order `ComponentName`, `componentName`, `component-name`.
    pub fn to_variables(&self) -> Variables {
        Variables::from([
            ("ComponentName".to_string(), self.pascal.clone()),
            ("componentName".to_string(), self.camel.clone()),
            ("component-name".to_string(), self.kebab.clone()),
        ])
    }
}

pub fn get_component_names(name: &str) -> ComponentNames {
    ComponentNames {
        pascal: to_pascal_case(name),
        camel: to_camel_case(name),
        kebab: to_kebab_case(name),
    }
}

/// Names derived for a page from its route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNames {
    #[serde(rename = "pageName")]
    pub page_name: String,
    #[serde(rename = "PageName")]
    pub pascal: String,
    #[serde(rename = "pageTitle")]
    pub title: String,
    #[serde(rename = "pageDescription")]
    pub description: String,
    #[serde(rename = "pagePath")]
    pub path: String,
}

/// Derives page names from the last segment of `page_path`.
///
/// ```
/// use file_factory::naming::get_page_names;
///
/// let names = get_page_names("dashboard/user-settings");
/// assert_eq!(names.page_name, "user-settings");
/// assert_eq!(names.title, "User Settings");
/// assert_eq!(names.description, "User Settings page");
/// ```
pub fn get_page_names(page_path: &str) -> PageNames {
    let page_name = page_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("index")
        .to_string();
    let pascal = to_pascal_case(&page_name);
    let title = CAPITAL.replace_all(&pascal, " $1").trim().to_string();

    PageNames {
        description: format!("{title} page"),
        page_name,
        pascal,
        title,
        path: page_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_fixed_point() {
        for name in ["Button", "DataTable", "Heading2", "X"] {
            assert_eq!(to_pascal_case(name), name);
        }
    }

    #[test]
    fn test_camel_case_of_empty_string() {
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_title_spacing() {
        assert_eq!(get_page_names("UserProfileSettings").title, "User Profile Settings");
    }
}
