//! Tests for configuration system

use itinex::Config;
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
    assert_eq!(config.planner.default_days, 3);
    assert_eq!(config.planner.max_days, 14);
    assert!(!config.planner.hidden_gems);
    assert_eq!(config.planner.surprise_level, 0.35);
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::load(None).expect("Failed to load config");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("custom.toml");
    std::fs::write(
        &path,
        "[planner]\ndefault_days = 5\nhidden_gems = true\nsurprise_level = 0.8\n",
    )?;

    let config = Config::load(Some(path.display().to_string()))?;

    assert_eq!(config.planner.default_days, 5);
    assert!(config.planner.hidden_gems);
    assert_eq!(config.planner.surprise_level, 0.8);
    // untouched keys keep their defaults
    assert_eq!(config.planner.max_days, 14);
    assert_eq!(config.logging.level, "info");

    Ok(())
}

#[test]
fn test_invalid_config_file_fails_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("invalid.toml");
    std::fs::write(&path, "[planner]\ndefault_days = 20\n")?;

    let config = Config::load(Some(path.display().to_string()))?;
    assert!(config.validate().is_err());

    Ok(())
}
