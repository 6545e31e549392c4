use clap::Parser;
use file_factory::cli::{Args, Commands, StoryFlags, TestFlags};
use file_factory::config::{Router, StyleSystem};
use std::ffi::OsString;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("file-factory")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_component_args() {
    let args = make_args(&["component", "data-table", "--style", "tailwind", "--with-story"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(
        parsed.command,
        Commands::Component {
            name: Some("data-table".to_string()),
            with_context: false,
            test: TestFlags::default(),
            story: StoryFlags { with_story: true, no_story: false },
            style: Some(StyleSystem::Tailwind),
        }
    );
    assert!(!parsed.dry_run);
    assert!(!parsed.verbose);
    assert!(!parsed.skip_hooks_check);
    assert_eq!(parsed.package, None);
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = make_args(&[
        "hook",
        "debounce",
        "--flat-file",
        "--dry-run",
        "-v",
        "-p",
        "@acme/ui",
        "--skip-hooks-check",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.dry_run);
    assert!(parsed.verbose);
    assert!(parsed.skip_hooks_check);
    assert_eq!(parsed.package.as_deref(), Some("@acme/ui"));
    match parsed.command {
        Commands::Hook { name, flat_file, test } => {
            assert_eq!(name.as_deref(), Some("debounce"));
            assert!(flat_file);
            assert_eq!(test.value(), None);
        }
        other => panic!("Expected hook command, got {other:?}"),
    }
}

#[test]
fn test_last_test_flag_wins() {
    let parsed = Args::try_parse_from(make_args(&["context", "Theme", "--with-test", "--no-test"]))
        .unwrap();
    let Commands::Context { test, .. } = parsed.command else {
        panic!("Expected context command");
    };
    assert_eq!(test.value(), Some(false));

    let parsed = Args::try_parse_from(make_args(&["context", "Theme", "--no-test", "--with-test"]))
        .unwrap();
    let Commands::Context { test, .. } = parsed.command else {
        panic!("Expected context command");
    };
    assert_eq!(test.value(), Some(true));
}

#[test]
fn test_page_router() {
    let parsed =
        Args::try_parse_from(make_args(&["page", "dashboard/settings", "--router", "app"])).unwrap();
    assert_eq!(
        parsed.command,
        Commands::Page { path: Some("dashboard/settings".to_string()), router: Some(Router::App) }
    );
}

#[test]
fn test_name_is_optional() {
    let parsed = Args::try_parse_from(make_args(&["component"])).unwrap();
    assert!(matches!(parsed.command, Commands::Component { name: None, .. }));

    let parsed = Args::try_parse_from(make_args(&["create"])).unwrap();
    assert_eq!(parsed.command, Commands::Create);
}

#[test]
fn test_invalid_args() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
    assert!(Args::try_parse_from(make_args(&["widget", "x"])).is_err());
    assert!(Args::try_parse_from(make_args(&["component", "x", "--style", "sass"])).is_err());
    assert!(Args::try_parse_from(make_args(&["page", "x", "--router", "hash"])).is_err());
}
