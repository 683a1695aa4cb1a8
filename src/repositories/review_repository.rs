use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::models::{RepositoryError, RepositoryResult, Review, ReviewTarget, TargetKind};

/// Trait defining the interface for review data access operations
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find all reviews for a target using the target GSI
    async fn find_by_target(&self, target: &ReviewTarget) -> RepositoryResult<Vec<Review>>;

    /// Find a review by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Review>>;

    /// Find all reviews posted by an author using the author GSI
    async fn find_by_author(&self, author_ref: &str) -> RepositoryResult<Vec<Review>>;

    /// Create a new review
    async fn create(&self, review: Review) -> RepositoryResult<Review>;

    /// Replace an existing review by id
    async fn update(&self, review: Review) -> RepositoryResult<Review>;

    /// Delete a review
    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

/// DynamoDB implementation of the ReviewRepository trait
pub struct DynamoDbReviewRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
    target_index: String,
    author_index: String,
}

impl DynamoDbReviewRepository {
    /// Create a new DynamoDB review repository
    pub fn new(client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            client,
            table_name,
            target_index: "TargetIndex".to_string(),
            author_index: "AuthorIndex".to_string(),
        }
    }

    /// Get the table name (for testing)
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Convert a Review struct to DynamoDB attribute values
    pub fn review_to_item(&self, review: &Review) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert("id".to_string(), AttributeValue::S(review.id.clone()));
        item.insert(
            "author_ref".to_string(),
            AttributeValue::S(review.author_ref.clone()),
        );
        item.insert(
            "target_kind".to_string(),
            AttributeValue::S(review.target.kind.to_string()),
        );
        item.insert(
            "target_id".to_string(),
            AttributeValue::S(review.target.id.clone()),
        );
        // Composite key backing the target GSI
        item.insert(
            "target_key".to_string(),
            AttributeValue::S(review.target.storage_key()),
        );
        item.insert(
            "rating".to_string(),
            AttributeValue::N(review.rating.to_string()),
        );
        item.insert("text".to_string(), AttributeValue::S(review.text.clone()));
        if let Some(ref image_ref) = review.image_ref {
            item.insert("image_ref".to_string(), AttributeValue::S(image_ref.clone()));
        }
        item.insert(
            "created_at".to_string(),
            AttributeValue::S(review.created_at.to_rfc3339()),
        );
        item.insert(
            "updated_at".to_string(),
            AttributeValue::S(review.updated_at.to_rfc3339()),
        );

        item
    }

    /// Convert DynamoDB item to Review struct
    pub fn item_to_review(&self, item: HashMap<String, AttributeValue>) -> RepositoryResult<Review> {
        use chrono::DateTime;
        use rust_decimal::Decimal;
        use std::str::FromStr;

        let id = item
            .get("id")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing id".to_string(),
            })?
            .clone();

        let author_ref = item
            .get("author_ref")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing author_ref".to_string(),
            })?
            .clone();

        let target_kind = item
            .get("target_kind")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| TargetKind::from_str(s).ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Invalid target_kind".to_string(),
            })?;

        let target_id = item
            .get("target_id")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Missing target_id".to_string(),
            })?
            .clone();

        let rating = item
            .get("rating")
            .and_then(|v| v.as_n().ok())
            .and_then(|s| Decimal::from_str(s).ok())
            .ok_or_else(|| RepositoryError::MalformedItem {
                message: "Invalid rating".to_string(),
            })?;

        let text = item
            .get("text")
            .and_then(|v| v.as_s().ok())
            .cloned()
            .unwrap_or_default();

        let image_ref = item.get("image_ref").and_then(|v| v.as_s().ok()).cloned();

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

        Ok(Review {
            id,
            author_ref,
            target: ReviewTarget {
                kind: target_kind,
                id: target_id,
            },
            rating,
            text,
            image_ref,
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

    fn parse_items(&self, items: Option<Vec<HashMap<String, AttributeValue>>>) -> Vec<Review> {
        let mut reviews = Vec::new();
        if let Some(items) = items {
            for item in items {
                match self.item_to_review(item) {
                    Ok(review) => reviews.push(review),
                    Err(e) => {
                        warn!("Failed to parse review item: {}", e);
                        continue;
                    }
                }
            }
        }
        reviews
    }
}

#[async_trait]
impl ReviewRepository for DynamoDbReviewRepository {
    #[instrument(skip(self), fields(table = %self.table_name, target = %target))]
    async fn find_by_target(&self, target: &ReviewTarget) -> RepositoryResult<Vec<Review>> {
        info!("Finding reviews by target using GSI");

        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.target_index)
            .key_condition_expression("target_key = :target_key")
            .expression_attribute_values(
                ":target_key",
                AttributeValue::S(target.storage_key()),
            )
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        let reviews = self.parse_items(response.items);

        info!("Found {} reviews for target {}", reviews.len(), target);
        Ok(reviews)
    }

    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Review>> {
        info!("Finding review by ID");

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
                let review = self.item_to_review(item)?;
                info!("Review found");
                Ok(Some(review))
            }
            None => {
                info!("Review not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), fields(table = %self.table_name, author_ref = %author_ref))]
    async fn find_by_author(&self, author_ref: &str) -> RepositoryResult<Vec<Review>> {
        info!("Finding reviews by author using GSI");

        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.author_index)
            .key_condition_expression("author_ref = :author_ref")
            .expression_attribute_values(
                ":author_ref",
                AttributeValue::S(author_ref.to_string()),
            )
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        let reviews = self.parse_items(response.items);

        info!("Found {} reviews by author", reviews.len());
        Ok(reviews)
    }

    #[instrument(skip(self, review), fields(table = %self.table_name, id = %review.id))]
    async fn create(&self, review: Review) -> RepositoryResult<Review> {
        info!("Creating new review");

        let item = self.review_to_item(&review);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Review created successfully");
        Ok(review)
    }

    #[instrument(skip(self, review), fields(table = %self.table_name, id = %review.id))]
    async fn update(&self, review: Review) -> RepositoryResult<Review> {
        info!("Updating review");

        let item = self.review_to_item(&review);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Review updated successfully");
        Ok(review)
    }

    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        info!("Deleting review");

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Review deleted successfully");
        Ok(())
    }
}
