use fmwdoc::core::config::{ConfigLoader, ConfigValidator, DocConfig};
use fmwdoc::core::types::OutputFormat;
use fmwdoc::core::workflow::RenderOptions;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn clear_fmwdoc_env() {
    for v in &[
        "FMWDOC_DEFAULT_FORMAT",
        "FMWDOC_SORT_TRANSFORMERS",
        "FMWDOC_EXTENSIONS",
        "FMWDOC_MARKDOWN_SUFFIX",
    ] {
        env::remove_var(v);
    }
}

/// File values feed the renderer options and survive validation
#[test]
#[serial]
fn test_config_loading_integration() {
    clear_fmwdoc_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("fmwdoc.toml"),
        r#"
[render]
default_format = "dot"
sort_transformers = true
hidden_parameter_prefixes = ["XFORMER_NAME", "TRANSFORMER_GROUP", "__"]

[scan]
extensions = ["fmw"]

[output]
markdown_suffix = ".md"

[logging]
default_level = "info"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    ConfigValidator::validate(&config).unwrap();

    assert_eq!(config.render.output_format().unwrap(), OutputFormat::Dot);
    assert!(config.scan.matches("fmw"));
    assert!(!config.scan.matches("txt"));

    let options = RenderOptions::from(&config);
    assert!(options.sort_transformers);
    assert!(options.is_hidden_parameter("__internal"));
}

#[test]
#[serial]
fn test_env_overrides_beat_file_values() {
    clear_fmwdoc_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("fmwdoc.toml"),
        "[output]\nmarkdown_suffix = \".md\"\n",
    )
    .unwrap();

    env::set_var("FMWDOC_MARKDOWN_SUFFIX", "_doc.md");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    assert_eq!(config.output.markdown_suffix, "_doc.md");

    clear_fmwdoc_env();
}

#[test]
#[serial]
fn test_env_override_can_produce_an_invalid_config() {
    clear_fmwdoc_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("FMWDOC_DEFAULT_FORMAT", "pdf");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert!(err.to_string().contains("unknown output format 'pdf'"));

    clear_fmwdoc_env();
}

#[test]
#[serial]
fn test_explicit_config_file_ignores_workspace_file() {
    clear_fmwdoc_env();
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("fmwdoc.toml"),
        "[render]\ndefault_format = \"json\"\n",
    )
    .unwrap();
    let elsewhere = TempDir::new().unwrap();
    let explicit = elsewhere.path().join("team.toml");
    fs::write(&explicit, "[render]\nsort_transformers = true\n").unwrap();

    let config = ConfigLoader::load_explicit(&explicit).unwrap();
    assert_eq!(config.render.default_format, "markdown");
    assert!(config.render.sort_transformers);
    assert_ne!(config, DocConfig::default());
}
