#[cfg(test)]
mod config_tests {
    use crate::config::{
        default_enable_json_logging, default_log_level, default_profiles_table,
        default_promotions_table, default_region, default_require_review_text,
        default_reviews_table, default_service_name, default_service_version, ConfigError,
        DatabaseConfig, ObservabilityConfig, ReviewConfig,
    };
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global; tests that touch them take
    // this lock so parallel test threads cannot interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_database_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::remove_var("STALLFOOD_REVIEWS_TABLE_NAME");
        env::remove_var("STALLFOOD_PROMOTIONS_TABLE_NAME");
        env::remove_var("STALLFOOD_PROFILES_TABLE_NAME");
        env::remove_var("STALLFOOD_REGION");

        let config = DatabaseConfig::from_env().unwrap();

        assert_eq!(config.reviews_table_name, "StallReviews");
        assert_eq!(config.promotions_table_name, "StallPromotions");
        assert_eq!(config.profiles_table_name, "StallProfiles");
        assert_eq!(config.region, "ap-southeast-1");
    }

    #[test]
    fn test_database_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::set_var("STALLFOOD_REVIEWS_TABLE_NAME", "TestReviews");
        env::set_var("STALLFOOD_PROMOTIONS_TABLE_NAME", "TestPromotions");

        let config = DatabaseConfig::from_env().unwrap();

        assert_eq!(config.reviews_table_name, "TestReviews");
        assert_eq!(config.promotions_table_name, "TestPromotions");

        // Clean up
        env::remove_var("STALLFOOD_REVIEWS_TABLE_NAME");
        env::remove_var("STALLFOOD_PROMOTIONS_TABLE_NAME");
    }

    #[test]
    fn test_review_config_policy() {
        let config = ReviewConfig {
            require_review_text: true,
        };
        assert!(config.policy().require_text);

        let config = ReviewConfig {
            require_review_text: false,
        };
        assert!(!config.policy().require_text);
    }

    #[test]
    fn test_observability_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::set_var("STALLFOOD_SERVICE_NAME", "test-service");
        env::set_var("STALLFOOD_LOG_LEVEL", "debug");

        let config = ObservabilityConfig::from_env().unwrap();

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.log_level, "debug");

        // Clean up
        env::remove_var("STALLFOOD_SERVICE_NAME");
        env::remove_var("STALLFOOD_LOG_LEVEL");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::LoadError {
            message: "bad environment".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration loading error: bad environment"
        );

        let error = ConfigError::ValidationError {
            message: "Invalid configuration".to_string(),
        };
        assert_eq!(error.to_string(), "Validation error: Invalid configuration");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_reviews_table(), "StallReviews");
        assert_eq!(default_promotions_table(), "StallPromotions");
        assert_eq!(default_profiles_table(), "StallProfiles");
        assert_eq!(default_region(), "ap-southeast-1");
        assert!(default_require_review_text());
        assert_eq!(default_service_name(), "stallfood-rs");
        assert_eq!(default_service_version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(default_log_level(), "info");
        assert!(!default_enable_json_logging());
    }
}
