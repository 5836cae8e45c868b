#![allow(non_snake_case)]

use super::*;

#[test]
fn ArchiveOptions___default___has_expected_values() {
    let options = ArchiveOptions::default();

    assert!(options.output_file.is_none());
    assert!(options.output_dir.is_none());
    assert!(options.password.is_none());
    assert!(options.force_local_time);
    assert_eq!(options.compression_level, Some(9));
    assert!(!options.create_once);
    assert!(options.filter_file.is_none());
    assert_eq!(options.encryption, EncryptionMethod::ZipCrypto);
}

#[test]
fn ArchiveOptions___from_empty_bytes___returns_defaults() {
    let options = ArchiveOptions::from_json(&[]).unwrap();

    assert!(options.force_local_time);
    assert_eq!(options.compression_level, Some(9));
}

#[test]
fn ArchiveOptions___from_json___accepts_short_aliases() {
    let json = r#"{"file": "out.zip", "dir": "release"}"#;

    let options = ArchiveOptions::from_json(json.as_bytes()).unwrap();

    assert_eq!(options.output_file, Some(PathBuf::from("out.zip")));
    assert_eq!(options.output_dir, Some(PathBuf::from("release")));
}

#[test]
fn ArchiveOptions___from_json___parses_format_flags() {
    let json = r#"{
        "password": "secret",
        "encryption": "aes256",
        "comment": "nightly",
        "forceLocalTime": false,
        "forceZip64": true,
        "namePrependSlash": true,
        "store": true,
        "createOnce": true
    }"#;

    let options = ArchiveOptions::from_json(json.as_bytes()).unwrap();

    assert_eq!(options.password.as_deref(), Some("secret"));
    assert_eq!(options.encryption, EncryptionMethod::Aes256);
    assert_eq!(options.comment.as_deref(), Some("nightly"));
    assert!(!options.force_local_time);
    assert_eq!(options.force_zip64, Some(true));
    assert_eq!(options.name_prepend_slash, Some(true));
    assert_eq!(options.store, Some(true));
    assert!(options.create_once);
}

#[test]
fn ArchiveOptions___from_json_invalid___returns_config_error() {
    let result = ArchiveOptions::from_json(b"{\"store\": \"yes\"}");

    assert!(matches!(result, Err(PackError::Config(_))));
}

#[test]
fn ArchiveOptions___from_toml___parses_fields() {
    let text = r#"
        outputFile = "dist.zip"
        comment = "from toml"
        compressionLevel = 3
    "#;

    let options = ArchiveOptions::from_toml(text).unwrap();

    assert_eq!(options.output_file, Some(PathBuf::from("dist.zip")));
    assert_eq!(options.comment.as_deref(), Some("from toml"));
    assert_eq!(options.compression_level, Some(3));
}

#[test]
fn ArchiveOptions___from_file___dispatches_on_extension() {
    let temp = tempfile::TempDir::new().unwrap();
    let json_path = temp.path().join("zip.json");
    let toml_path = temp.path().join("zip.toml");
    std::fs::write(&json_path, r#"{"store": true}"#).unwrap();
    std::fs::write(&toml_path, "store = false").unwrap();

    let from_json = ArchiveOptions::from_file(&json_path).unwrap();
    let from_toml = ArchiveOptions::from_file(&toml_path).unwrap();

    assert_eq!(from_json.store, Some(true));
    assert_eq!(from_toml.store, Some(false));
}

#[test]
fn ArchiveOptions___from_file_unknown_extension___returns_config_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("zip.yaml");
    std::fs::write(&path, "store: true").unwrap();

    let result = ArchiveOptions::from_file(&path);

    assert!(matches!(result, Err(PackError::Config(_))));
}

#[test]
fn ArchiveOptions___serialize___omits_password() {
    let options = ArchiveOptions::new().with_password("secret");

    let json = serde_json::to_string(&options).unwrap();

    assert!(!json.contains("secret"));
}

#[test]
fn ArchiveOptions___debug___redacts_password() {
    let options = ArchiveOptions::new().with_password("secret");

    let debug = format!("{options:?}");

    assert!(!debug.contains("secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn ArchiveOptions___with_filter___excludes_matching_artifacts() {
    let options = ArchiveOptions::new().with_filter(|artifact| artifact.name() == "README.txt");

    assert!(options.excludes(&BuildArtifact::asset("README.txt", "docs")));
    assert!(!options.excludes(&BuildArtifact::code("main.js", "x")));
}

#[test]
fn ArchiveOptions___without_filter___excludes_nothing() {
    let options = ArchiveOptions::new();

    assert!(!options.excludes(&BuildArtifact::asset("README.txt", "docs")));
}

#[test]
fn ArchiveOptions___format_options___passes_flags_through() {
    let options = ArchiveOptions::new()
        .with_comment("c")
        .with_password("pw")
        .with_store(true)
        .with_force_zip64(true)
        .with_name_prepend_slash(false)
        .with_compression_level(5);

    let format = options.format_options();

    assert_eq!(format.comment.as_deref(), Some("c"));
    assert_eq!(format.password.as_deref(), Some("pw"));
    assert_eq!(format.store, Some(true));
    assert_eq!(format.force_zip64, Some(true));
    assert_eq!(format.name_prepend_slash, Some(false));
    assert_eq!(format.compression_level, Some(5));
    assert_eq!(format.force_local_time, Some(true));
}

#[test]
fn ArchiveOptions___format_options_unset_flags___stay_unset() {
    let format = ArchiveOptions::new().format_options();

    assert!(format.comment.is_none());
    assert!(format.password.is_none());
    assert!(format.store.is_none());
    assert!(format.force_zip64.is_none());
    assert!(format.name_prepend_slash.is_none());
}

#[test]
fn ArchiveOptions___empty_password___formats_without_password() {
    let options = ArchiveOptions::new().with_password("");

    let format = options.format_options();

    assert!(format.password.is_none());
}
