use std::fs;
use std::path::Path;

use file_factory::config::{
    BarrelPosition, ComponentConfig, FileFactoryConfig, Router, StyleSystem,
};
use file_factory::error::Error;
use file_factory::loader::{
    available_template_types, build_package_map, builtin_template_candidates,
    builtin_templates_dir, find_templates_dir, merge_layers,
    resolve_config, resolve_package_dir, ConfigProvider, InlineConfigProvider, ResolveOptions,
};
use serde_json::json;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A pnpm workspace with one package at `packages/ui`.
fn workspace() -> TempDir {
    let root = TempDir::new().unwrap();
    write(root.path(), "pnpm-workspace.yaml", "packages:\n  - packages/*\n");
    write(root.path(), "package.json", r#"{"name":"root"}"#);
    write(root.path(), "packages/ui/package.json", r#"{"name":"@acme/ui"}"#);
    root
}

#[test]
fn test_defaults_without_config_files() {
    let root = workspace();
    let resolved = resolve_config(ResolveOptions {
        package_root: Some(root.path().join("packages/ui")),
        workspace_root: None,
    })
    .unwrap();

    assert_eq!(resolved.config, FileFactoryConfig::default());
    assert!(resolved.package_config_path.is_none());
    assert!(resolved.workspace_config_path.is_none());
    assert_eq!(resolved.workspace_root.as_deref(), Some(root.path()));
}

#[test_log::test]
fn test_workspace_and_package_layers_merge() {
    let root = workspace();
    write(root.path(), ".file-factory/config.yaml", "component:\n  withStory: false\n");
    write(
        root.path(),
        "packages/ui/.file-factory/config.json",
        r#"{"component":{"styleSystem":"tailwind"}}"#,
    );

    let resolved = resolve_config(ResolveOptions {
        package_root: Some(root.path().join("packages/ui")),
        workspace_root: None,
    })
    .unwrap();

    assert_eq!(
        resolved.config.component,
        ComponentConfig {
            style_system: StyleSystem::Tailwind,
            with_story: false,
            ..ComponentConfig::default()
        }
    );
    assert_eq!(resolved.config.hook, Default::default());
    assert!(resolved.package_config_path.unwrap().ends_with("config.json"));
    assert!(resolved.workspace_config_path.unwrap().ends_with("config.yaml"));
}

#[test]
fn test_package_layer_wins() {
    let root = workspace();
    write(root.path(), ".file-factory/config.toml", "[page]\nrouter = \"app\"\ndirectory = \"src/app\"\n");
    write(root.path(), "packages/ui/.file-factory/config.yml", "page:\n  router: pages\n");

    let resolved = resolve_config(ResolveOptions {
        package_root: Some(root.path().join("packages/ui")),
        workspace_root: Some(root.path().to_path_buf()),
    })
    .unwrap();

    assert_eq!(resolved.config.page.router, Router::Pages);
    assert_eq!(resolved.config.page.directory, "src/app");
}

#[test_log::test]
fn test_invalid_layer_is_ignored() {
    let root = workspace();
    write(root.path(), ".file-factory/config.json", r#"{"component":{"withStory":true}}"#);
    write(
        root.path(),
        "packages/ui/.file-factory/config.json",
        r#"{"component":{"styleSystem":"sass"}}"#,
    );

    let resolved = resolve_config(ResolveOptions {
        package_root: Some(root.path().join("packages/ui")),
        workspace_root: None,
    })
    .unwrap();

    assert!(resolved.config.component.with_story);
    assert_eq!(resolved.config.component.style_system, StyleSystem::CssModules);
}

#[test]
fn test_unknown_keys_and_wrong_types_are_rejected() {
    let typo = InlineConfigProvider::new("typo", json!({ "component": { "withStorys": true } }));
    let wrong_type = InlineConfigProvider::new("type", json!({ "hook": { "withTest": "yes" } }));
    let valid = InlineConfigProvider::new(
        "valid",
        json!({
            "context": { "directory": "src/state" },
            "component": {
                "updateBarrels": [{ "file": "src/index.ts", "template": "export * from './{{ComponentName}}';", "position": "alphabetical" }]
            }
        }),
    );

    let providers: [&dyn ConfigProvider; 3] = [&typo, &wrong_type, &valid];
    let config = merge_layers(&providers);

    assert!(!config.component.with_story);
    assert!(config.hook.with_test);
    assert_eq!(config.context.directory, "src/state");
    assert_eq!(config.component.update_barrels.len(), 1);
    assert_eq!(config.component.update_barrels[0].position, BarrelPosition::Alphabetical);
    assert!(config.component.update_barrels[0].skip_if_exists);
}

#[test]
fn test_update_barrels_replaced_by_later_layer() {
    let first = InlineConfigProvider::new(
        "first",
        json!({ "hook": { "updateBarrels": [
            { "file": "a.ts", "template": "x" },
            { "file": "b.ts", "template": "y" }
        ] } }),
    );
    let second = InlineConfigProvider::new(
        "second",
        json!({ "hook": { "updateBarrels": [{ "file": "c.ts", "template": "z" }] } }),
    );

    let config = merge_layers(&[&first, &second]);
    let files: Vec<&str> = config.hook.update_barrels.iter().map(|b| b.file.as_str()).collect();
    assert_eq!(files, ["c.ts"]);
}

#[test]
fn test_package_map_prefers_apps() {
    let root = workspace();
    write(root.path(), "packages/web/package.json", r#"{"name":"@acme/web"}"#);
    write(root.path(), "apps/web/package.json", r#"{"name":"web"}"#);
    write(root.path(), "packages/broken/package.json", "not json");

    let map = build_package_map(root.path());
    assert_eq!(map["@acme/ui"], root.path().join("packages/ui"));
    assert_eq!(map["ui"], root.path().join("packages/ui"));
    assert_eq!(map["@acme/web"], root.path().join("packages/web"));
    assert_eq!(map["web"], root.path().join("apps/web"));
    assert!(!map.values().any(|dir| dir.ends_with("broken")));
}

#[test]
fn test_resolve_package_dir() {
    let root = workspace();
    assert_eq!(resolve_package_dir("ui", root.path()), Some(root.path().join("packages/ui")));
    assert_eq!(
        resolve_package_dir("packages/ui", root.path()),
        Some(root.path().join("packages/ui"))
    );
    let absolute = root.path().join("packages/ui");
    assert_eq!(resolve_package_dir(absolute.to_str().unwrap(), root.path()), Some(absolute.clone()));
    assert_eq!(resolve_package_dir("missing", root.path()), None);
    assert_eq!(resolve_package_dir("apps/missing", root.path()), None);
}

#[test]
fn test_templates_dir_fallback_order() {
    let root = workspace();
    let package = root.path().join("packages/ui");
    let builtin = TempDir::new().unwrap();
    fs::create_dir_all(builtin.path().join("hook")).unwrap();
    fs::create_dir_all(builtin.path().join("component")).unwrap();
    fs::create_dir_all(root.path().join(".file-factory/templates/component")).unwrap();

    let found = find_templates_dir("hook", &package, Some(root.path()), builtin.path()).unwrap();
    assert_eq!(found, builtin.path().join("hook"));

    let found = find_templates_dir("component", &package, Some(root.path()), builtin.path()).unwrap();
    assert_eq!(found, root.path().join(".file-factory/templates/component"));

    fs::create_dir_all(package.join(".file-factory/templates/component")).unwrap();
    let found = find_templates_dir("component", &package, Some(root.path()), builtin.path()).unwrap();
    assert_eq!(found, package.join(".file-factory/templates/component"));

    let missing = find_templates_dir("widget", &package, Some(root.path()), builtin.path());
    assert!(matches!(missing, Err(Error::TemplatesNotFoundError { template_type }) if template_type == "widget"));

    assert_eq!(available_template_types(builtin.path()), ["component", "hook"]);
}

#[test]
fn test_builtin_templates_lookup() {
    let candidates = builtin_template_candidates();
    let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
    assert!(candidates.contains(&exe_dir.join("templates")));

    let builtin = builtin_templates_dir();
    assert!(builtin.is_dir());
    assert_eq!(
        available_template_types(&builtin),
        ["component", "component-with-context", "context", "hook", "hook-with-directory", "page-app", "page-pages"]
    );
}
