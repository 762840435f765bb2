use std::fs;

use dirscope_scan::{NodeKind, ScanConfig, ScanError, TreeBuilder, WarningKind};
use tempfile::TempDir;

/// Root with `a.txt` (10 bytes), `b.txt` (20 bytes) and `sub/c.log` (5 bytes).
fn example_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.txt"), vec![b'a'; 10]).unwrap();
    fs::write(root.join("b.txt"), vec![b'b'; 20]).unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.log"), vec![b'c'; 5]).unwrap();
    temp
}

#[test]
fn test_example_statistics() {
    let temp = example_tree();
    let outcome = TreeBuilder::new().build(&ScanConfig::new(temp.path())).unwrap();
    let stats = outcome.stats();

    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.total_dirs, 1);
    assert_eq!(stats.total_size, 35);
    assert_eq!(stats.extension_counts.len(), 2);
    assert_eq!(stats.extension_counts["txt"], 2);
    assert_eq!(stats.extension_counts["log"], 1);
}

#[test]
fn test_repeated_builds_are_identical() {
    let temp = example_tree();
    fs::create_dir(temp.path().join("Zeta")).unwrap();
    fs::write(temp.path().join("alpha.md"), "x").unwrap();
    fs::write(temp.path().join("Beta.md"), "y").unwrap();

    let config = ScanConfig::new(temp.path());
    let first = TreeBuilder::new().build(&config).unwrap();
    let second = TreeBuilder::new().build(&config).unwrap();

    assert_eq!(first.root, second.root);

    let names: Vec<_> = first.root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Beta.md", "Zeta", "a.txt", "alpha.md", "b.txt", "sub"]);
}

#[test]
fn test_max_depth_zero_truncates_subdirectories() {
    let temp = example_tree();
    fs::create_dir(temp.path().join("empty")).unwrap();

    let config = ScanConfig::builder()
        .root(temp.path())
        .max_depth(Some(0u32))
        .build()
        .unwrap();
    let outcome = TreeBuilder::new().build(&config).unwrap();

    let dirs: Vec<_> = outcome.root.children.iter().filter(|c| c.is_dir()).collect();
    assert_eq!(dirs.len(), 2);
    for dir in dirs {
        assert!(dir.children.is_empty());
        assert!(dir.truncated);
    }

    let stats = outcome.stats();
    assert_eq!(stats.total_dirs, 2);
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_size, 30);
}

#[test]
fn test_max_depth_one_expands_one_level() {
    let temp = example_tree();
    fs::create_dir_all(temp.path().join("sub/deeper/deepest")).unwrap();

    let config = ScanConfig::builder()
        .root(temp.path())
        .max_depth(Some(1u32))
        .build()
        .unwrap();
    let outcome = TreeBuilder::new().build(&config).unwrap();

    let sub = outcome
        .root
        .children
        .iter()
        .find(|c| c.name.as_str() == "sub")
        .unwrap();
    assert!(!sub.truncated);
    let deeper = sub.children.iter().find(|c| c.name.as_str() == "deeper").unwrap();
    assert!(deeper.truncated);
    assert!(deeper.children.is_empty());
    assert_eq!(deeper.depth, 2);
}

#[test]
fn test_unlimited_depth_never_truncates() {
    let temp = example_tree();
    fs::create_dir_all(temp.path().join("a/b/c/d/e")).unwrap();

    let outcome = TreeBuilder::new().build(&ScanConfig::new(temp.path())).unwrap();
    assert_eq!(outcome.stats().max_depth, 5);

    fn any_truncated(node: &dirscope_scan::Node) -> bool {
        node.truncated || node.children.iter().any(any_truncated)
    }
    assert!(!any_truncated(&outcome.root));
}

#[test]
fn test_excluded_entries_leave_no_trace() {
    let temp = example_tree();
    fs::create_dir(temp.path().join(".git")).unwrap();
    fs::write(temp.path().join(".git/HEAD"), "ref").unwrap();
    fs::write(temp.path().join("debug.log"), "noise").unwrap();

    let config = ScanConfig::builder()
        .root(temp.path())
        .exclude_patterns(vec!["*.log".to_string()])
        .include_hidden(false)
        .build()
        .unwrap();
    let outcome = TreeBuilder::new().build(&config).unwrap();
    let stats = outcome.stats();

    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_dirs, 1);
    assert!(!stats.extension_counts.contains_key("log"));
    let sub = &outcome.root.children[2];
    assert_eq!(sub.name.as_str(), "sub");
    assert!(sub.children.is_empty());
}

#[test]
fn test_missing_root_fails() {
    let temp = TempDir::new().unwrap();
    let result = TreeBuilder::new().build(&ScanConfig::new(temp.path().join("nope")));

    match result {
        Err(err @ ScanError::NotFound { .. }) => assert!(err.is_invalid_root()),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_file_root_fails() {
    let temp = example_tree();
    let result = TreeBuilder::new().build(&ScanConfig::new(temp.path().join("a.txt")));

    assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();
    let outcome = TreeBuilder::new().build(&ScanConfig::new(temp.path())).unwrap();

    assert!(outcome.root.children.is_empty());
    assert!(!outcome.root.truncated);
    assert_eq!(outcome.stats().total_dirs, 0);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_leaves() {
    use std::os::unix::fs::symlink;

    let temp = example_tree();
    // A link back to the root would loop forever if followed
    symlink(temp.path(), temp.path().join("sub/loop")).unwrap();

    let outcome = TreeBuilder::new().build(&ScanConfig::new(temp.path())).unwrap();
    let sub = outcome
        .root
        .children
        .iter()
        .find(|c| c.name.as_str() == "sub")
        .unwrap();
    let link = sub.children.iter().find(|c| c.name.as_str() == "loop").unwrap();

    assert_eq!(link.kind, NodeKind::Symlink);
    assert!(link.children.is_empty());
    assert!(link.link_target.is_some());

    let stats = outcome.stats();
    assert_eq!(stats.total_symlinks, 1);
    assert_eq!(stats.total_files, 3);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_becomes_warning() {
    use std::os::unix::fs::PermissionsExt;

    let temp = example_tree();
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret.txt"), "hidden").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let privileged = fs::read_dir(&locked).is_ok();
    let result = TreeBuilder::new().build(&ScanConfig::new(temp.path()));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let outcome = result.unwrap();

    // Privileged users read the directory like any other
    if privileged {
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.stats().total_files, 4);
        return;
    }

    let node = outcome
        .root
        .children
        .iter()
        .find(|c| c.name.as_str() == "locked")
        .unwrap();
    assert!(node.is_dir());
    assert!(node.children.is_empty());

    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::PermissionDenied);
    assert_eq!(outcome.stats().total_files, 3);
}
