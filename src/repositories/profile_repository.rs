use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{
    RepositoryError, RepositoryResult, RestrictionList, RestrictionTag, UserProfile,
};

/// Trait defining the interface for profile data access operations
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by user ID
    async fn find_by_id(&self, user_id: &str) -> RepositoryResult<Option<UserProfile>>;

    /// Create a new profile
    async fn create(&self, profile: UserProfile) -> RepositoryResult<UserProfile>;

    /// Replace an existing profile by user ID
    async fn update(&self, profile: UserProfile) -> RepositoryResult<UserProfile>;
}

/// DynamoDB implementation of the ProfileRepository trait
pub struct DynamoDbProfileRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
}

impl DynamoDbProfileRepository {
    /// Create a new DynamoDB profile repository
    pub fn new(client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Get the table name (for testing)
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Convert a UserProfile struct to DynamoDB attribute values
    pub fn profile_to_item(&self, profile: &UserProfile) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert(
            "user_id".to_string(),
            AttributeValue::S(profile.user_id.clone()),
        );
        item.insert(
            "username".to_string(),
            AttributeValue::S(profile.username.clone()),
        );
        if let Some(ref avatar_ref) = profile.avatar_ref {
            item.insert(
                "avatar_ref".to_string(),
                AttributeValue::S(avatar_ref.clone()),
            );
        }

        // Restrictions stored as an ordered list of normalized tags
        let restrictions: Vec<AttributeValue> = profile
            .dietary_restrictions
            .iter()
            .map(|tag| AttributeValue::S(tag.as_str().to_string()))
            .collect();
        item.insert(
            "dietary_restrictions".to_string(),
            AttributeValue::L(restrictions),
        );

        item.insert(
            "created_at".to_string(),
            AttributeValue::S(profile.created_at.to_rfc3339()),
        );
        item.insert(
            "updated_at".to_string(),
            AttributeValue::S(profile.updated_at.to_rfc3339()),
        );

        item
    }

    /// Convert DynamoDB item to UserProfile struct
    pub fn item_to_profile(
        &self,
        item: HashMap<String, AttributeValue>,
    ) -> RepositoryResult<UserProfile> {
        use chrono::DateTime;

        let user_id = item
            .get("user_id")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing user_id".to_string(),
            })?
            .clone();

        let username = item
            .get("username")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing username".to_string(),
            })?
            .clone();

        let avatar_ref = item.get("avatar_ref").and_then(|v| v.as_s().ok()).cloned();

        let dietary_restrictions: RestrictionList = item
            .get("dietary_restrictions")
            .and_then(|v| v.as_l().ok())
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_s().ok())
                    .map(|s| RestrictionTag::new(s))
                    .collect()
            })
            .unwrap_or_default();

        let created_at = item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Invalid created_at".to_string(),
            })?;

        let updated_at = item
            .get("updated_at")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or(created_at);

        Ok(UserProfile {
            user_id,
            username,
            avatar_ref,
            dietary_restrictions,
            created_at,
            updated_at,
        })
    }

    /// Convert a DynamoDB error to RepositoryError
    fn map_dynamodb_error(&self, error: DynamoDbError) -> RepositoryError {
        error!("DynamoDB error: {:?}", error);

        if matches!(error, DynamoDbError::ResourceNotFoundException(_)) {
            return RepositoryError::TableNotFound {
                table_name: self.table_name.clone(),
            };
        }

        RepositoryError::AwsSdk {
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl ProfileRepository for DynamoDbProfileRepository {
    #[instrument(skip(self), fields(table = %self.table_name, user_id = %user_id))]
    async fn find_by_id(&self, user_id: &str) -> RepositoryResult<Option<UserProfile>> {
        info!("Finding profile by user ID");

        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        match response.item {
            Some(item) => {
                let profile = self.item_to_profile(item)?;
                info!("Profile found");
                Ok(Some(profile))
            }
            None => {
                info!("Profile not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, profile), fields(table = %self.table_name, user_id = %profile.user_id))]
    async fn create(&self, profile: UserProfile) -> RepositoryResult<UserProfile> {
        info!("Creating new profile");

        let item = self.profile_to_item(&profile);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(user_id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Profile created successfully");
        Ok(profile)
    }

    #[instrument(skip(self, profile), fields(table = %self.table_name, user_id = %profile.user_id))]
    async fn update(&self, profile: UserProfile) -> RepositoryResult<UserProfile> {
        info!("Updating profile");

        let item = self.profile_to_item(&profile);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(user_id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Profile updated successfully");
        Ok(profile)
    }
}
