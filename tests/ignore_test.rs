use file_factory::ignore::{build_ignore_set, default_ignore_set};

#[test]
fn test_default_patterns() {
    let glob_set = default_ignore_set().unwrap();

    assert!(glob_set.is_match(".DS_Store"));
    assert!(glob_set.is_match("{{ComponentName}}/.DS_Store"));
    assert!(glob_set.is_match("Thumbs.db"));
    assert!(!glob_set.is_match("{{ComponentName}}.tsx.j2"));
    assert!(!glob_set.is_match(".gitignore"));
    assert!(!glob_set.is_match(".factoryignore"));
}

#[test]
fn test_custom_patterns() {
    let glob_set = build_ignore_set(["*.md", "fixtures/**"]).unwrap();
    assert!(glob_set.is_match("README.md"));
    assert!(glob_set.is_match("fixtures/sample.json"));
    assert!(!glob_set.is_match("index.ts.j2"));
}

#[test]
fn test_invalid_pattern() {
    assert!(build_ignore_set(["[unclosed"]).is_err());
}
