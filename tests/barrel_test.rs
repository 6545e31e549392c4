use std::fs;

use file_factory::barrel::{update_barrel, update_barrels, UpdateBarrelOptions};
use file_factory::config::{BarrelPosition, BarrelUpdate};
use file_factory::interpolate::Variables;
use tempfile::TempDir;

fn barrel(position: BarrelPosition) -> BarrelUpdate {
    BarrelUpdate {
        file: "src/index.ts".to_string(),
        template: "export * from './{{ComponentName}}';\n".to_string(),
        position,
        skip_if_exists: true,
    }
}

fn vars(name: &str) -> Variables {
    Variables::from([("ComponentName".to_string(), name.to_string())])
}

#[test]
fn test_missing_barrel_is_created_with_header() {
    let package = TempDir::new().unwrap();
    let barrel_update = barrel(BarrelPosition::Append);
    let variables = vars("Button");

    let result = update_barrel(&UpdateBarrelOptions {
        barrel_update: &barrel_update,
        variables: &variables,
        package_root: package.path(),
        dry_run: false,
    })
    .unwrap();

    assert!(result.created);
    assert!(result.updated);
    assert!(!result.skipped);
    assert_eq!(result.file_path, package.path().join("src/index.ts"));
    assert_eq!(
        fs::read_to_string(package.path().join("src/index.ts")).unwrap(),
        "// Auto-generated barrel file\nexport * from './Button';\n"
    );
}

#[test]
fn test_second_update_is_skipped() {
    let package = TempDir::new().unwrap();
    let barrel_update = barrel(BarrelPosition::Append);
    let variables = vars("Button");
    let options = UpdateBarrelOptions {
        barrel_update: &barrel_update,
        variables: &variables,
        package_root: package.path(),
        dry_run: false,
    };

    update_barrel(&options).unwrap();
    let after_first = fs::read_to_string(package.path().join("src/index.ts")).unwrap();

    let second = update_barrel(&options).unwrap();
    assert!(second.skipped);
    assert!(!second.updated);
    assert_eq!(fs::read_to_string(package.path().join("src/index.ts")).unwrap(), after_first);
}

#[test]
fn test_duplicates_allowed_without_skip_if_exists() {
    let package = TempDir::new().unwrap();
    let mut barrel_update = barrel(BarrelPosition::Append);
    barrel_update.skip_if_exists = false;

    let results = update_barrels(
        &[barrel_update.clone(), barrel_update],
        &vars("Button"),
        package.path(),
        false,
    );

    assert!(results.iter().all(|r| r.updated));
    let content = fs::read_to_string(package.path().join("src/index.ts")).unwrap();
    assert_eq!(content.matches("export * from './Button';").count(), 2);
}

#[test]
fn test_prepend_after_header_comment() {
    let package = TempDir::new().unwrap();
    fs::create_dir_all(package.path().join("src")).unwrap();
    fs::write(
        package.path().join("src/index.ts"),
        "// Public API\n// keep sorted\nexport * from './Card';\n",
    )
    .unwrap();

    update_barrels(&[barrel(BarrelPosition::Prepend)], &vars("Alert"), package.path(), false);

    assert_eq!(
        fs::read_to_string(package.path().join("src/index.ts")).unwrap(),
        "// Public API\n// keep sorted\nexport * from './Alert';\nexport * from './Card';\n"
    );
}

#[test]
fn test_alphabetical_order() {
    let package = TempDir::new().unwrap();
    let barrel_update = barrel(BarrelPosition::Alphabetical);
    for name in ["Card", "Alert", "Button"] {
        update_barrels(std::slice::from_ref(&barrel_update), &vars(name), package.path(), false);
    }

    assert_eq!(
        fs::read_to_string(package.path().join("src/index.ts")).unwrap(),
        "// Auto-generated barrel file\n\nexport * from './Alert';\nexport * from './Button';\nexport * from './Card';\n"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let package = TempDir::new().unwrap();
    let results =
        update_barrels(&[barrel(BarrelPosition::Append)], &vars("Button"), package.path(), true);

    assert!(results[0].created);
    assert_eq!(results[0].export_line, "export * from './Button';\n");
    assert!(!package.path().join("src").exists());
}

#[test_log::test]
fn test_failed_barrel_keeps_other_results() {
    let package = TempDir::new().unwrap();
    fs::create_dir_all(package.path().join("src/components")).unwrap();
    let unreadable = BarrelUpdate { file: "src/components".to_string(), ..barrel(BarrelPosition::Append) };

    let results = update_barrels(
        &[unreadable, barrel(BarrelPosition::Append)],
        &vars("Button"),
        package.path(),
        false,
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_path, package.path().join("src/index.ts"));
    assert!(results[0].updated);
    assert_eq!(
        fs::read_to_string(package.path().join("src/index.ts")).unwrap(),
        "// Auto-generated barrel file\nexport * from './Button';\n"
    );
}
