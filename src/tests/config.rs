use crate::config::Config;
use tempfile::TempDir;

#[test]
fn default_config_round_trips_through_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config/config.toml");

    Config::create_default(&path).unwrap();
    let config = Config::load(&path).unwrap();

    assert!(config.merge.skip_critical);
    assert!(!config.merge.directories_only);
    assert!(config.display.color_output);
}

#[test]
fn partial_config_files_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[merge]\ndirectories_only = true\n").unwrap();

    let config = Config::load(&path).unwrap();

    assert!(config.merge.directories_only);
    // unspecified fields keep their defaults
    assert!(config.merge.skip_critical);
    assert!(config.display.color_output);
}
