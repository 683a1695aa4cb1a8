use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    AggregateRating, EditReviewRequest, Review, ReviewFilters, ReviewTarget, ServiceError,
    ServiceResult, Session, SubmitReviewRequest, Validate,
};
use crate::repositories::ReviewRepository;

/// Review-screen policy, sourced from configuration
#[derive(Debug, Clone)]
pub struct ReviewPolicy {
    /// When set, a review cannot be submitted with blank text
    pub require_text: bool,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self { require_text: true }
    }
}

/// Service for posting, editing and aggregating reviews
pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
    policy: ReviewPolicy,
}

impl ReviewService {
    /// Create a new ReviewService with the default policy
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self {
            repository,
            policy: ReviewPolicy::default(),
        }
    }

    /// Create a new ReviewService with an explicit policy
    pub fn new_with_policy(repository: Arc<dyn ReviewRepository>, policy: ReviewPolicy) -> Self {
        Self { repository, policy }
    }

    /// List reviews for a target, newest first, with optional filters
    /// applied after the fetch
    #[instrument(skip(self), fields(target = %target))]
    pub async fn list_reviews(
        &self,
        target: &ReviewTarget,
        filters: ReviewFilters,
    ) -> ServiceResult<Vec<Review>> {
        info!("Listing reviews for target");

        let reviews = self.repository.find_by_target(target).await?;

        let mut filtered: Vec<Review> = reviews
            .into_iter()
            .filter(|review| review.matches_filters(&filters))
            .collect();
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!("Found {} reviews matching criteria", filtered.len());
        Ok(filtered)
    }

    /// Compute the aggregate rating for a target from its current reviews
    #[instrument(skip(self), fields(target = %target))]
    pub async fn rating_for_target(&self, target: &ReviewTarget) -> ServiceResult<AggregateRating> {
        let reviews = self.repository.find_by_target(target).await?;
        let aggregate = AggregateRating::from_reviews(&reviews);

        info!(
            average = %aggregate.average,
            review_count = aggregate.review_count,
            "Computed aggregate rating"
        );
        Ok(aggregate)
    }

    /// Submit a new review from a validated draft. The draft is consumed;
    /// after success the screen rebuilds its form state from defaults.
    #[instrument(skip(self, draft), fields(author = %session.user_id, target = %target))]
    pub async fn submit_review(
        &self,
        session: &Session,
        target: ReviewTarget,
        draft: SubmitReviewRequest,
    ) -> ServiceResult<Review> {
        info!("Submitting new review");

        draft.validate()?;
        crate::models::validate_review_text(&draft.text, self.policy.require_text)?;

        let review = Review::new(session.user_id.clone(), target, draft);
        let created = self.repository.create(review).await?;

        info!("Review submitted successfully with ID: {}", created.id);
        Ok(created)
    }

    /// Edit an existing review. Produces a replacement value with a
    /// refreshed `updated_at`; the stored review is swapped by id.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn edit_review(&self, id: &str, patch: EditReviewRequest) -> ServiceResult<Review> {
        info!("Editing review");

        patch.validate()?;

        let existing = match self.repository.find_by_id(id).await? {
            Some(review) => review,
            None => {
                warn!("Review not found for edit");
                return Err(ServiceError::ReviewNotFound { id: id.to_string() });
            }
        };

        let edited = existing.apply_patch(&patch);
        // Text may have been blanked by the patch; re-check the policy on
        // the merged value
        crate::models::validate_review_text(&edited.text, self.policy.require_text)?;

        let updated = self.repository.update(edited).await?;

        info!("Review edited successfully");
        Ok(updated)
    }

    /// Delete a review
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_review(&self, id: &str) -> ServiceResult<()> {
        info!("Deleting review");

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ServiceError::ReviewNotFound { id: id.to_string() });
        }

        self.repository.delete(id).await?;

        info!("Review deleted successfully");
        Ok(())
    }

    /// List everything a user has posted, for the profile screen
    #[instrument(skip(self), fields(author = %author_ref))]
    pub async fn list_by_author(&self, author_ref: &str) -> ServiceResult<Vec<Review>> {
        let reviews = self.repository.find_by_author(author_ref).await?;

        info!("Found {} reviews by author", reviews.len());
        Ok(reviews)
    }
}
