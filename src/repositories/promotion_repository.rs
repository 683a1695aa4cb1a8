use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::models::{Promotion, RepositoryError, RepositoryResult};

/// Trait defining the interface for promotion data access operations
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Find all promotions for a stall using the stall GSI
    async fn find_by_stall(&self, stall_ref: &str) -> RepositoryResult<Vec<Promotion>>;

    /// Find a promotion by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Promotion>>;

    /// Create a new promotion
    async fn create(&self, promotion: Promotion) -> RepositoryResult<Promotion>;

    /// Replace an existing promotion by id
    async fn update(&self, promotion: Promotion) -> RepositoryResult<Promotion>;

    /// Delete a promotion
    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

/// DynamoDB implementation of the PromotionRepository trait
pub struct DynamoDbPromotionRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
    stall_index: String,
}

impl DynamoDbPromotionRepository {
    /// Create a new DynamoDB promotion repository
    pub fn new(client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            client,
            table_name,
            stall_index: "StallIndex".to_string(),
        }
    }

    /// Get the table name (for testing)
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Convert a Promotion struct to DynamoDB attribute values
    pub fn promotion_to_item(&self, promotion: &Promotion) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert("id".to_string(), AttributeValue::S(promotion.id.clone()));
        item.insert(
            "stall_ref".to_string(),
            AttributeValue::S(promotion.stall_ref.clone()),
        );
        item.insert(
            "title".to_string(),
            AttributeValue::S(promotion.title.clone()),
        );
        item.insert(
            "description".to_string(),
            AttributeValue::S(promotion.description.clone()),
        );
        if let Some(ref image_ref) = promotion.image_ref {
            item.insert("image_ref".to_string(), AttributeValue::S(image_ref.clone()));
        }
        // Calendar dates stored as ISO `YYYY-MM-DD`, no timezone
        item.insert(
            "start_date".to_string(),
            AttributeValue::S(promotion.start_date.to_string()),
        );
        if let Some(end_date) = promotion.end_date {
            item.insert(
                "end_date".to_string(),
                AttributeValue::S(end_date.to_string()),
            );
        }
        item.insert(
            "created_at".to_string(),
            AttributeValue::S(promotion.created_at.to_rfc3339()),
        );
        item.insert(
            "updated_at".to_string(),
            AttributeValue::S(promotion.updated_at.to_rfc3339()),
        );

        item
    }

    /// Convert DynamoDB item to Promotion struct
    pub fn item_to_promotion(
        &self,
        item: HashMap<String, AttributeValue>,
    ) -> RepositoryResult<Promotion> {
        use chrono::{DateTime, NaiveDate};

        let id = item
            .get("id")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing id".to_string(),
            })?
            .clone();

        let stall_ref = item
            .get("stall_ref")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing stall_ref".to_string(),
            })?
            .clone();

        let title = item
            .get("title")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing title".to_string(),
            })?
            .clone();

        let description = item
            .get("description")
            .and_then(|v| v.as_s().ok())
            .cloned()
            .unwrap_or_default();

        let image_ref = item.get("image_ref").and_then(|v| v.as_s().ok()).cloned();

        let start_date = item
            .get("start_date")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| s.parse::<NaiveDate>().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Invalid start_date".to_string(),
            })?;

        let end_date = item
            .get("end_date")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| s.parse::<NaiveDate>().ok());

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

        Ok(Promotion {
            id,
            stall_ref,
            title,
            description,
            image_ref,
            start_date,
            end_date,
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
impl PromotionRepository for DynamoDbPromotionRepository {
    #[instrument(skip(self), fields(table = %self.table_name, stall_ref = %stall_ref))]
    async fn find_by_stall(&self, stall_ref: &str) -> RepositoryResult<Vec<Promotion>> {
        info!("Finding promotions by stall using GSI");

        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.stall_index)
            .key_condition_expression("stall_ref = :stall_ref")
            .expression_attribute_values(":stall_ref", AttributeValue::S(stall_ref.to_string()))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        let mut promotions = Vec::new();
        if let Some(items) = response.items {
            for item in items {
                match self.item_to_promotion(item) {
                    Ok(promotion) => promotions.push(promotion),
                    Err(e) => {
                        warn!("Failed to parse promotion item: {}", e);
                        continue;
                    }
                }
            }
        }

        info!("Found {} promotions for stall", promotions.len());
        Ok(promotions)
    }

    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Promotion>> {
        info!("Finding promotion by ID");

        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        match response.item {
            Some(item) => {
                let promotion = self.item_to_promotion(item)?;
                info!("Promotion found");
                Ok(Some(promotion))
            }
            None => {
                info!("Promotion not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, promotion), fields(table = %self.table_name, id = %promotion.id))]
    async fn create(&self, promotion: Promotion) -> RepositoryResult<Promotion> {
        info!("Creating new promotion");

        let item = self.promotion_to_item(&promotion);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Promotion created successfully");
        Ok(promotion)
    }

    #[instrument(skip(self, promotion), fields(table = %self.table_name, id = %promotion.id))]
    async fn update(&self, promotion: Promotion) -> RepositoryResult<Promotion> {
        info!("Updating promotion");

        let item = self.promotion_to_item(&promotion);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Promotion updated successfully");
        Ok(promotion)
    }

    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        info!("Deleting promotion");

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Promotion deleted successfully");
        Ok(())
    }
}
