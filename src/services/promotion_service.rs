use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    validate_promotion_window, CreatePromotionRequest, Promotion, ServiceError, ServiceResult,
    UpdatePromotionRequest, Validate,
};
use crate::repositories::PromotionRepository;

/// Service for managing stall promotions
pub struct PromotionService {
    repository: Arc<dyn PromotionRepository>,
}

impl PromotionService {
    /// Create a new PromotionService
    pub fn new(repository: Arc<dyn PromotionRepository>) -> Self {
        Self { repository }
    }

    /// List all promotions for a stall
    #[instrument(skip(self), fields(stall_ref = %stall_ref))]
    pub async fn list_for_stall(&self, stall_ref: &str) -> ServiceResult<Vec<Promotion>> {
        info!("Listing promotions for stall");

        let mut promotions = self.repository.find_by_stall(stall_ref).await?;
        promotions.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        info!("Found {} promotions", promotions.len());
        Ok(promotions)
    }

    /// List only the promotions active on the given calendar date
    #[instrument(skip(self), fields(stall_ref = %stall_ref, today = %today))]
    pub async fn list_active(
        &self,
        stall_ref: &str,
        today: NaiveDate,
    ) -> ServiceResult<Vec<Promotion>> {
        let promotions = self.repository.find_by_stall(stall_ref).await?;

        let active: Vec<Promotion> = promotions
            .into_iter()
            .filter(|promotion| promotion.is_active_on(today))
            .collect();

        info!("Found {} active promotions", active.len());
        Ok(active)
    }

    /// Get a specific promotion by ID
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_promotion(&self, id: &str) -> ServiceResult<Promotion> {
        match self.repository.find_by_id(id).await? {
            Some(promotion) => Ok(promotion),
            None => {
                warn!("Promotion not found");
                Err(ServiceError::PromotionNotFound { id: id.to_string() })
            }
        }
    }

    /// Create a new promotion. The date window is validated before the
    /// promotion enters the system.
    #[instrument(skip(self, request), fields(stall_ref = %request.stall_ref, title = %request.title))]
    pub async fn create_promotion(
        &self,
        request: CreatePromotionRequest,
    ) -> ServiceResult<Promotion> {
        info!("Creating new promotion");

        request.validate()?;

        let promotion = Promotion::new(request);
        let created = self.repository.create(promotion).await?;

        info!("Promotion created successfully with ID: {}", created.id);
        Ok(created)
    }

    /// Update an existing promotion. The merged date window is re-validated
    /// after the patch is applied, so an edit can never produce a window
    /// with the end before the start.
    #[instrument(skip(self, request), fields(id = %id))]
    pub async fn update_promotion(
        &self,
        id: &str,
        request: UpdatePromotionRequest,
    ) -> ServiceResult<Promotion> {
        info!("Updating promotion");

        request.validate()?;

        let existing = match self.repository.find_by_id(id).await? {
            Some(promotion) => promotion,
            None => {
                return Err(ServiceError::PromotionNotFound { id: id.to_string() });
            }
        };

        let mut promotion = existing.clone();
        promotion.update(request);
        validate_promotion_window(promotion.start_date, promotion.end_date.as_ref())?;

        let updated = self.repository.update(promotion).await?;

        info!("Promotion updated successfully");
        Ok(updated)
    }

    /// Delete a promotion
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_promotion(&self, id: &str) -> ServiceResult<()> {
        info!("Deleting promotion");

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ServiceError::PromotionNotFound { id: id.to_string() });
        }

        self.repository.delete(id).await?;

        info!("Promotion deleted successfully");
        Ok(())
    }
}
