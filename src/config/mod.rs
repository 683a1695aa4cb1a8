use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub reviews: ReviewConfig,
    pub observability: ObservabilityConfig,
    pub aws: AwsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_reviews_table")]
    pub reviews_table_name: String,
    #[serde(default = "default_promotions_table")]
    pub promotions_table_name: String,
    #[serde(default = "default_profiles_table")]
    pub profiles_table_name: String,
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_require_review_text")]
    pub require_review_text: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub dynamodb_client: DynamoDbClient,
}

impl Config {
    pub async fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let database = DatabaseConfig::from_env()?;
        let reviews = ReviewConfig::from_env()?;
        let observability = ObservabilityConfig::from_env()?;

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(database.region.clone()))
            .load()
            .await;

        let aws = AwsConfig {
            region: database.region.clone(),
            dynamodb_client: DynamoDbClient::new(&aws_config),
        };

        let config = Config {
            database,
            reviews,
            observability,
            aws,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.reviews_table_name.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Reviews table name cannot be empty".to_string(),
            });
        }

        if self.database.promotions_table_name.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Promotions table name cannot be empty".to_string(),
            });
        }

        if self.database.profiles_table_name.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Profiles table name cannot be empty".to_string(),
            });
        }

        if self.observability.service_name.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Service name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("database")
    }
}

impl ReviewConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("review")
    }

    /// The review-screen policy derived from this configuration
    pub fn policy(&self) -> crate::services::ReviewPolicy {
        crate::services::ReviewPolicy {
            require_text: self.require_review_text,
        }
    }
}

impl ObservabilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("observability")
    }
}

fn load_section<T: serde::de::DeserializeOwned>(section: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("STALLFOOD"))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings.try_deserialize().map_err(|e| ConfigError::LoadError {
        message: format!("Failed to deserialize {} config: {}", section, e),
    })
}

pub(crate) fn default_reviews_table() -> String {
    "StallReviews".to_string()
}

pub(crate) fn default_promotions_table() -> String {
    "StallPromotions".to_string()
}

pub(crate) fn default_profiles_table() -> String {
    "StallProfiles".to_string()
}

pub(crate) fn default_region() -> String {
    "ap-southeast-1".to_string()
}

pub(crate) fn default_require_review_text() -> bool {
    true
}

pub(crate) fn default_service_name() -> String {
    "stallfood-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_enable_json_logging() -> bool {
    false
}
