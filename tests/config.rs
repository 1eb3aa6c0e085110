#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};
    use tareo::libs::config::{Config, MatrixConfig, PermissionConfig, CONFIG_FILE_NAME};
    use tareo::libs::data_storage::DataStorage;
    use tareo::libs::matrix::MatrixBuilder;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // HOME is process-wide, so tests that point it at a temp dir take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ConfigTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.matrix.is_none());
        assert!(config.permissions.is_none());

        let matrix = config.matrix_or_default();
        assert_eq!(matrix.standard_workday_hours, 8.0);
        assert_eq!(matrix.cache_capacity, 10_000);
        assert!(matrix.cache_enabled);
        assert!(!matrix.allow_overnight);
        assert!(!matrix.strict_roster);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(_ctx: &mut ConfigTestContext) {
        let mut labels = BTreeMap::new();
        labels.insert("TEL".to_string(), "Teletrabajo".to_string());

        let config = Config {
            matrix: Some(MatrixConfig {
                standard_workday_hours: 9.5,
                cache_capacity: 200,
                cache_enabled: false,
                allow_overnight: true,
                strict_roster: true,
            }),
            permissions: Some(PermissionConfig { labels }),
        };
        config.save().unwrap();

        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        assert!(path.exists());

        let read_config = Config::read().unwrap();
        assert_eq!(read_config, config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_matrix_section_uses_defaults(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{ "matrix": { "standard_workday_hours": 10.0 } }"#).unwrap();

        let matrix = Config::read().unwrap().matrix_or_default();
        assert_eq!(matrix.standard_workday_hours, 10.0);
        assert_eq!(matrix.cache_capacity, 10_000);
        assert!(matrix.cache_enabled);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_is_an_error(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_out_of_range_workday_falls_back_to_default(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        for hours in ["1e300", "-2", "0", "24", "0.0"] {
            let json = format!(
                r#"{{ "matrix": {{ "standard_workday_hours": {}, "cache_capacity": 50 }} }}"#,
                hours
            );
            std::fs::write(&path, json).unwrap();

            let matrix = Config::read().unwrap().matrix_or_default();
            assert_eq!(matrix.standard_workday_hours, 8.0, "workday {}", hours);
            assert_eq!(matrix.cache_capacity, 50);
        }
    }

    #[test]
    fn test_validated_keeps_usable_workday() {
        let config = MatrixConfig {
            standard_workday_hours: 23.5,
            ..Default::default()
        };
        assert_eq!(config.clone().validated(), config);
        assert!(!MatrixConfig::is_valid_workday(f64::NAN));
        assert!(!MatrixConfig::is_valid_workday(f64::INFINITY));
    }

    #[test]
    fn test_builder_follows_config() {
        let mut labels = BTreeMap::new();
        labels.insert("tel".to_string(), "Teletrabajo".to_string());
        let config = Config {
            matrix: Some(MatrixConfig {
                cache_enabled: false,
                standard_workday_hours: 6.0,
                ..Default::default()
            }),
            permissions: Some(PermissionConfig { labels }),
        };

        let builder = MatrixBuilder::from_config(&config);
        assert!(builder.cache().is_none());
        assert_eq!(builder.aggregator().standard_workday_hours(), 6.0);
        assert_eq!(builder.classifier().catalog().label("TEL"), "Teletrabajo");
        assert_eq!(builder.classifier().catalog().label("VAC"), "Vacaciones");
    }
}
