//! Integration tests for end-to-end configuration resolution.
//!
//! Exercises the full pipeline over a real directory tree: declared base
//! files, variant overlay derivation, ordered loading, deep merge, and
//! serde construction.

use confstack::{ConfigError, DirSource, LayeredConfig, Resolver};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ServiceConfig {
    timeout: u64,
    #[serde(default)]
    nested: serde_json::Map<String, Value>,
}

impl LayeredConfig for ServiceConfig {
    fn config_files() -> &'static [&'static str] {
        &["configs/service.yml"]
    }
}

#[derive(Debug, Deserialize)]
struct NoDeclaration {
    timeout: u64,
}

impl LayeredConfig for NoDeclaration {
    fn config_files() -> &'static [&'static str] {
        &[]
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `content` at `relative` under the fixture root.
fn write_config(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).expect("failed to create config dir");
    std::fs::write(path, content).expect("failed to write config file");
}

fn base_fixture() -> TempDir {
    init_tracing();
    let temp = TempDir::new().expect("failed to create temp dir");
    write_config(
        temp.path(),
        "configs/service.yml",
        "timeout: 10\nnested:\n  a: 1\n  b: 2\n",
    );
    temp
}

mod overlay_precedence {
    use super::*;

    #[test]
    fn missing_overlay_leaves_base_unchanged() {
        let temp = base_fixture();
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let config: ServiceConfig = resolver.load_with(Some("prod"), None).unwrap();
        assert_eq!(config.timeout, 10);
        assert_eq!(config.nested["a"], 1);
        assert_eq!(config.nested["b"], 2);
    }

    #[test]
    fn overlay_overrides_one_nested_field_keeps_siblings() {
        let temp = base_fixture();
        write_config(temp.path(), "configs/service.prod.yml", "nested:\n  b: 99\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let config: ServiceConfig = resolver.load_with(Some("prod"), None).unwrap();
        assert_eq!(config.timeout, 10);
        assert_eq!(config.nested["a"], 1);
        assert_eq!(config.nested["b"], 99);
    }

    #[test]
    fn overlays_are_selected_by_variant() {
        let temp = base_fixture();
        write_config(temp.path(), "configs/service.prod.yml", "timeout: 60\n");
        write_config(temp.path(), "configs/service.dev.yml", "timeout: 1\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let prod: ServiceConfig = resolver.load_with(Some("prod"), None).unwrap();
        let dev: ServiceConfig = resolver.load_with(Some("dev"), None).unwrap();
        assert_eq!(prod.timeout, 60);
        assert_eq!(dev.timeout, 1);
    }

    #[test]
    fn empty_overlay_file_changes_nothing() {
        let temp = base_fixture();
        write_config(temp.path(), "configs/service.prod.yml", "");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let config: ServiceConfig = resolver.load_with(Some("prod"), None).unwrap();
        assert_eq!(config.timeout, 10);
    }
}

mod override_paths {
    use super::*;

    #[test]
    fn override_bypasses_invalid_declaration() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "alt/service.yml", "timeout: 7\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let config: NoDeclaration = resolver
            .load_with(Some("prod"), Some(&["alt/service.yml"]))
            .unwrap();
        assert_eq!(config.timeout, 7);
    }

    #[test]
    fn invalid_declaration_without_override_is_config_files_required() {
        let temp = TempDir::new().unwrap();
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let err = resolver
            .load_with::<NoDeclaration>(Some("prod"), None)
            .unwrap_err();
        let ConfigError::ConfigFilesRequired { type_name, .. } = err else {
            panic!("expected ConfigFilesRequired, got {err}");
        };
        assert!(type_name.contains("NoDeclaration"));
    }

    #[test]
    fn override_paths_still_get_variant_overlays() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "alt/service.yml", "timeout: 7\n");
        write_config(temp.path(), "alt/service.prod.yml", "timeout: 8\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let config: NoDeclaration = resolver
            .load_with(Some("prod"), Some(&["alt/service.yml"]))
            .unwrap();
        assert_eq!(config.timeout, 8);
    }
}

mod failure_modes {
    use super::*;

    #[test]
    fn malformed_yaml_aborts_resolution() {
        let temp = base_fixture();
        write_config(temp.path(), "configs/service.prod.yml", "nested: [broken\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let err = resolver
            .load_with::<ServiceConfig>(Some("prod"), None)
            .unwrap_err();
        let ConfigError::SourceLoad { path, .. } = err else {
            panic!("expected SourceLoad, got {err}");
        };
        assert_eq!(path, "configs.service.prod.yml");
    }

    #[test]
    fn unknown_key_rejected_at_construction() {
        let temp = base_fixture();
        write_config(temp.path(), "configs/service.prod.yml", "surprise: true\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let err = resolver
            .load_with::<ServiceConfig>(Some("prod"), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn missing_required_field_rejected_at_construction() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "configs/service.yml", "nested:\n  a: 1\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let err = resolver
            .load_with::<ServiceConfig>(Some("prod"), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}

mod multiple_base_files {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct CombinedConfig {
        timeout: u64,
        endpoint: String,
    }

    impl LayeredConfig for CombinedConfig {
        fn config_files() -> &'static [&'static str] {
            &["configs/defaults.yml", "configs/service.yml"]
        }
    }

    #[test]
    fn later_base_wins_then_any_overlay_wins() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "configs/defaults.yml",
            "timeout: 1\nendpoint: http://localhost\n",
        );
        write_config(temp.path(), "configs/service.yml", "timeout: 2\n");
        write_config(temp.path(), "configs/defaults.prod.yml", "timeout: 3\n");
        let resolver = Resolver::new(DirSource::new(temp.path()));

        let config: CombinedConfig = resolver.load_with(Some("prod"), None).unwrap();
        // configs/defaults.prod.yml loads after both base files.
        assert_eq!(config.timeout, 3);
        assert_eq!(config.endpoint, "http://localhost");
    }
}
