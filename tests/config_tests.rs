use chessgate::chess::LegalityMode;
use chessgate::cli::Config;
use chessgate::gate::DEFAULT_UNLOCK_SEQUENCE;
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod config_file_tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.strict_legality = true;
        config.unicode_board = false;
        config.gate.username = "alice".to_string();
        config.save_to(&path).expect("Failed to save config");

        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded, config);
        assert_eq!(loaded.legality_mode(), LegalityMode::Strict);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "strict_legality = true\n\n[gate]\npassword = \"hunter2\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.strict_legality);
        assert!(config.unicode_board);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.gate.username, "testuser");
        assert_eq!(config.gate.password, "hunter2");
        assert_eq!(config.gate.unlock_sequence, DEFAULT_UNLOCK_SEQUENCE);
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert!(Config::load_from(&temp_dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "strict_legality = \"sometimes\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}

#[cfg(test)]
mod config_validation_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.legality_mode(), LegalityMode::Permissive);
        assert_eq!(config.detector().unwrap().len(), 6);
        assert!(config.credentials().verify("testuser", "12345678"));
    }

    #[test]
    fn test_empty_unlock_sequence_rejected() {
        let mut config = Config::default();
        config.gate.unlock_sequence.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_step_rejected_on_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[gate]\nunlock_sequence = [\"e2e4\", \"Nf3\"]\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unlock sequence"), "{err:#}");
    }

    #[test]
    fn test_sequence_steps_are_normalized() {
        let mut config = Config::default();
        config.gate.unlock_sequence = vec!["d2d4".to_string(), "d7 d5".to_string()];
        assert_eq!(config.detector().unwrap().steps(), ["d2-d4", "d7-d5"]);
    }
}
