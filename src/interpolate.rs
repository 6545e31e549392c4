//! `{{VariableName}}` interpolation for filenames and short strings, and the
//! `_when_<flag>_` conditional-file convention.

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::{Captures, Regex};

use crate::constants::TEMPLATE_EXTENSION;

/// Ordered variables used for filename, barrel and message interpolation.
///
/// Order matters: generators treat the first entry as the artifact's primary name.
pub type Variables = IndexMap<String, String>;

/// Flags deciding which conditional template entries are materialized.
pub type ConditionalFlags = HashMap<String, bool>;

static INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([a-zA-Z][a-zA-Z0-9-]*)\}\}").expect("valid regex"));
static CONDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_when_([a-zA-Z]+)_(.+)$").expect("valid regex"));

/// Replaces `{{VariableName}}` placeholders with values from `variables`.
///
/// Placeholders without a matching variable are left as they are.
///
/// ```
/// use file_factory::interpolate::{interpolate, Variables};
///
/// let vars = Variables::from([("ComponentName".to_string(), "Button".to_string())]);
/// assert_eq!(interpolate("{{ComponentName}}.tsx", &vars), "Button.tsx");
/// assert_eq!(interpolate("{{Missing}}.tsx", &vars), "{{Missing}}.tsx");
/// ```
pub fn interpolate(template: &str, variables: &Variables) -> String {
    INTERPOLATION
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Interpolates a filename and strips the template extension marker.
///
/// Returns the final name and whether the entry is a template to be rendered.
pub fn interpolate_filename(filename: &str, variables: &Variables) -> (String, bool) {
    let interpolated = interpolate(filename, variables);
    match interpolated.strip_suffix(TEMPLATE_EXTENSION) {
        Some(stripped) => (stripped.to_string(), true),
        None => (interpolated, false),
    }
}

/// Lists the distinct placeholder names in `template`, in order of first appearance.
pub fn extract_variables(template: &str) -> Vec<String> {
    INTERPOLATION
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// A filename carrying the `_when_<condition>_` prefix.
#[derive(Debug, PartialEq, Eq)]
pub struct ConditionalFilename<'a> {
    pub condition: &'a str,
    pub filename: &'a str,
}

/// Splits `_when_<condition>_<filename>` into its parts, or `None` for plain names.
pub fn parse_conditional_filename(filename: &str) -> Option<ConditionalFilename<'_>> {
    let caps = CONDITIONAL.captures(filename)?;
    Some(ConditionalFilename {
        condition: caps.get(1)?.as_str(),
        filename: caps.get(2)?.as_str(),
    })
}

/// Conditional names are included only when their flag is set to `true`;
/// plain names are always included.
pub fn should_include_conditional_file(filename: &str, flags: &ConditionalFlags) -> bool {
    match parse_conditional_filename(filename) {
        Some(parsed) => flags.get(parsed.condition).copied().unwrap_or(false),
        None => true,
    }
}

/// Returns the filename without its conditional prefix.
pub fn get_actual_filename(filename: &str) -> &str {
    parse_conditional_filename(filename).map_or(filename, |parsed| parsed.filename)
}
