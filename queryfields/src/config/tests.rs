use super::*;

fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_defaults() {
    let config = SieveConfig::default();
    assert_eq!(config.include_arg_name(), "fields");
    assert_eq!(config.exclude_arg_name(), "fields!");
    assert_eq!(config.delimiter(), ",");
    assert_eq!(config, DEFAULT_CONFIG);
}

#[test]
fn test_builder_rejects_empty_delimiter() {
    let err = SieveConfig::builder().delimiter("").build().unwrap_err();
    assert_eq!(err, ConfigError::EmptyDelimiter);
}

#[test]
fn test_builder_rejects_empty_names() {
    let err = SieveConfig::builder().include_arg("").build().unwrap_err();
    assert_eq!(
        err,
        ConfigError::EmptyArgName {
            param: ArgKind::Include
        }
    );

    let err = SieveConfig::builder().exclude_arg("").build().unwrap_err();
    assert_eq!(
        err,
        ConfigError::EmptyArgName {
            param: ArgKind::Exclude
        }
    );
}

#[test]
fn test_builder_rejects_conflicting_names() {
    let err = SieveConfig::builder()
        .exclude_arg("fields")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::ConflictingArgNames {
            name: "fields".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "Include and exclude parameters must differ, both are 'fields'"
    );
}

#[test]
fn test_builder_multichar_delimiter() {
    let config = SieveConfig::builder().delimiter("::").build().unwrap();
    assert_eq!(config.delimiter(), "::");
}

#[test]
fn test_from_env_overrides() {
    let config = SieveConfig::from_env(&env(&[
        ("QUERYFIELDS_INCLUDE_ARG", "only"),
        ("QUERYFIELDS_EXCLUDE_ARG", "omit"),
        ("UNRELATED", "x"),
    ]))
    .unwrap();

    assert_eq!(config.include_arg_name(), "only");
    assert_eq!(config.exclude_arg_name(), "omit");
    assert_eq!(config.delimiter(), ",");
}

#[test]
fn test_from_env_empty_is_defaults() {
    assert_eq!(SieveConfig::from_env(&[]).unwrap(), SieveConfig::new());
}

#[test]
fn test_from_env_invalid() {
    let err = SieveConfig::from_env(&env(&[("QUERYFIELDS_DELIMITER", "")])).unwrap_err();
    assert_eq!(err, ConfigError::EmptyDelimiter);
}

#[test]
fn test_from_toml_full_table() {
    let config = SieveConfig::from_toml(
        r#"
[server]
port = 8080

[queryfields]
include_arg_name = "only"
exclude_arg_name = "omit"
delimiter = ";"
"#,
    )
    .unwrap();

    assert_eq!(config.include_arg_name(), "only");
    assert_eq!(config.exclude_arg_name(), "omit");
    assert_eq!(config.delimiter(), ";");
}

#[test]
fn test_from_toml_without_table() {
    let config = SieveConfig::from_toml("[server]\nport = 8080\n").unwrap();
    assert_eq!(config, SieveConfig::new());
}

#[test]
fn test_from_toml_rejects_unknown_keys() {
    let err = SieveConfig::from_toml("[queryfields]\nseparator = \";\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDocument { .. }));
}

#[test]
fn test_from_toml_rejects_malformed_document() {
    let err = SieveConfig::from_toml("[queryfields\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDocument { .. }));
    assert!(
        err.to_string()
            .starts_with("Invalid queryfields configuration:")
    );
}

#[test]
fn test_from_toml_validates() {
    let err = SieveConfig::from_toml("[queryfields]\nexclude_arg_name = \"fields\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ConflictingArgNames { .. }));
}
