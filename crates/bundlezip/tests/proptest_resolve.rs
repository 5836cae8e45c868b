//! Property-based tests for archive path resolution
//!
//! Tests that resolved paths are absolute zip files inside the expected
//! directory for any package identity or relative output file.

use bundlezip::{ArchiveOptions, PackageEnv, resolve_output_path};
use proptest::prelude::*;
use std::path::{Component, Path};
use tempfile::TempDir;

// Strategy: package names as package managers allow them, optionally scoped
fn arb_package_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9._-]{0,30}",
        ("[a-z][a-z0-9-]{0,10}", "[a-z][a-z0-9-]{0,10}")
            .prop_map(|(scope, name)| format!("@{scope}/{name}")),
    ]
}

// Strategy: semver-ish versions
fn arb_version() -> impl Strategy<Value = String> {
    (0u32..100, 0u32..100, 0u32..100).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

// Strategy: relative file paths with one or more normal components
fn arb_relative_file() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..4)
        .prop_map(|parts| format!("{}.zip", parts.join("/")))
}

proptest! {
    /// Property: without an explicit file the archive lands directly in the announced dir
    #[test]
    fn proptest_default_name_is_absolute_zip_in_announced_dir(
        name in proptest::option::of(arb_package_name()),
        version in proptest::option::of(arb_version()),
    ) {
        let build = TempDir::new().unwrap();
        let env = PackageEnv::new(name.clone(), version.clone());

        let resolved = resolve_output_path(&ArchiveOptions::default(), build.path(), &env)
            .expect("resolution should succeed");

        prop_assert!(resolved.file.is_absolute());
        prop_assert_eq!(resolved.file.extension().and_then(|e| e.to_str()), Some("zip"));
        prop_assert_eq!(resolved.file.parent(), Some(build.path()));
        prop_assert!(resolved.warnings.is_empty());

        let stem = resolved.file.file_stem().and_then(|s| s.to_str()).unwrap().to_string();
        match (&name, &version) {
            (None, None) => prop_assert_eq!(stem, "bundle"),
            (_, Some(version)) => {
                let suffix = format!("-{}", version);
                prop_assert!(stem.ends_with(&suffix));
            }
            (Some(_), None) => prop_assert!(!stem.is_empty()),
        }
    }

    /// Property: a relative output file is joined onto the announced dir unchanged
    #[test]
    fn proptest_relative_file_joins_announced_dir(file in arb_relative_file()) {
        let build = TempDir::new().unwrap();
        let options = ArchiveOptions::default().with_output_file(&file);

        let resolved = resolve_output_path(&options, build.path(), &PackageEnv::default())
            .expect("resolution should succeed");

        prop_assert_eq!(&resolved.file, &build.path().join(&file));
        prop_assert!(resolved.file.starts_with(build.path()));
    }

    /// Property: an absolute output file is used as given, whatever the package identity
    #[test]
    fn proptest_absolute_file_wins(
        name in arb_package_name(),
        version in arb_version(),
        file in arb_relative_file(),
    ) {
        let build = TempDir::new().unwrap();
        let target = build.path().join("elsewhere").join(&file);
        let options = ArchiveOptions::default().with_output_file(&target);
        let env = PackageEnv::new(Some(name), Some(version));

        let resolved = resolve_output_path(&options, Path::new("/announced"), &env)
            .expect("resolution should succeed");

        prop_assert_eq!(resolved.file, target);
    }

    /// Property: the basename never introduces extra path components
    #[test]
    fn proptest_basename_is_single_component(name in arb_package_name(), version in arb_version()) {
        let basename = PackageEnv::new(Some(name), Some(version)).basename();

        let components: Vec<_> = Path::new(&basename).components().collect();
        prop_assert_eq!(components.len(), 1);
        prop_assert!(matches!(components[0], Component::Normal(_)));
    }
}
