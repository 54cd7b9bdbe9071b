//! Tests for interaction configs.

use rydberg_pulse::{ DEFAULT_INTERACTION_COEFF, Error, InteractionConfig };

#[test]
fn default_config() {
    let config = InteractionConfig::default();
    assert_eq!(config.interaction_coeff, DEFAULT_INTERACTION_COEFF);
    assert_eq!(config.interaction_coeff, 862690.0);
    assert!(config.max_distance.is_none());
}

#[test]
fn empty_document_keeps_defaults() {
    assert_eq!(InteractionConfig::from_toml_str("").unwrap(), InteractionConfig::default());
}

#[test]
fn reads_interaction_table() {
    let config = InteractionConfig::from_toml_str(
        "[interaction]\ninteraction_coeff = 5420503.0\nmax_distance = 12.5\n",
    )
    .unwrap();
    assert_eq!(config.interaction_coeff, 5420503.0);
    assert_eq!(config.max_distance, Some(12.5));
}

#[test]
fn reads_top_level_keys_and_integers() {
    let config = InteractionConfig::from_toml_str("max_distance = 10\nother = true\n")
        .unwrap();
    assert_eq!(config.interaction_coeff, DEFAULT_INTERACTION_COEFF);
    assert_eq!(config.max_distance, Some(10.0));
}

#[test]
fn rejects_non_positive_values() {
    assert!(matches!(
        InteractionConfig::from_toml_str("interaction_coeff = -1.0"),
        Err(Error::InvalidParameter { name: "interaction_coeff", .. }),
    ));
    assert!(matches!(
        InteractionConfig::from_toml_str("[interaction]\nmax_distance = 0\n"),
        Err(Error::InvalidParameter { name: "max_distance", .. }),
    ));
    assert!(matches!(
        InteractionConfig::from_toml_str("max_distance = nan"),
        Err(Error::InvalidParameter { name: "max_distance", .. }),
    ));
    assert!(matches!(
        InteractionConfig::from_toml_str("interaction_coeff = inf"),
        Err(Error::InvalidParameter { name: "interaction_coeff", .. }),
    ));
}

#[test]
fn rejects_malformed_documents() {
    assert!(matches!(
        InteractionConfig::from_toml_str("max_distance = \"far\""),
        Err(Error::Toml(_)),
    ));
    assert!(matches!(
        InteractionConfig::from_toml_str("interaction = 3"),
        Err(Error::Toml(_)),
    ));
    assert!(matches!(
        InteractionConfig::from_toml_str("[interaction]\ninteraction_coeff = true\n"),
        Err(Error::Toml(_)),
    ));
    assert!(matches!(
        InteractionConfig::from_toml_str("interaction_coeff = "),
        Err(Error::Toml(_)),
    ));
}

#[test]
fn interaction_table_takes_precedence_over_top_level() {
    let config = InteractionConfig::from_toml_str(
        "max_distance = 3.0\n[interaction]\ninteraction_coeff = 10\n",
    )
    .unwrap();
    assert_eq!(config.interaction_coeff, 10.0);
    assert!(config.max_distance.is_none());
}

#[test]
fn validate_checks_struct_literals() {
    assert!(InteractionConfig::default().validate().is_ok());
    let config = InteractionConfig { interaction_coeff: 1.0, max_distance: Some(-2.0) };
    assert!(matches!(
        config.validate(),
        Err(Error::InvalidParameter { name: "max_distance", value }) if value == -2.0,
    ));
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir()
        .join(format!("rydberg-pulse-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[interaction]\nmax_distance = 7.0\n").unwrap();
    let config = InteractionConfig::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.unwrap().max_distance, Some(7.0));

    assert!(matches!(
        InteractionConfig::load(std::env::temp_dir().join("no-such-rydberg-config.toml")),
        Err(Error::Io(_)),
    ));
}
