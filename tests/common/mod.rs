use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use stallfood_rs::models::{
    Promotion, RepositoryError, RepositoryResult, Review, ReviewTarget, SubmitReviewRequest,
    UserProfile,
};
use stallfood_rs::repositories::{ProfileRepository, PromotionRepository, ReviewRepository};

/// In-memory stand-in for the remote data store. Writes can be switched to
/// fail to exercise persist-error paths.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    reviews: Arc<Mutex<HashMap<String, Review>>>,
    promotions: Arc<Mutex<HashMap<String, Promotion>>>,
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a connection error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed);
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn find_by_target(&self, target: &ReviewTarget) -> RepositoryResult<Vec<Review>> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews
            .values()
            .filter(|review| &review.target == target)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Review>> {
        Ok(self.reviews.lock().unwrap().get(id).cloned())
    }

    async fn find_by_author(&self, author_ref: &str) -> RepositoryResult<Vec<Review>> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews
            .values()
            .filter(|review| review.author_ref == author_ref)
            .cloned()
            .collect())
    }

    async fn create(&self, review: Review) -> RepositoryResult<Review> {
        self.check_writable()?;
        let mut reviews = self.reviews.lock().unwrap();
        if reviews.contains_key(&review.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Review already exists: {}", review.id),
            });
        }
        reviews.insert(review.id.clone(), review.clone());
        Ok(review)
    }

    async fn update(&self, review: Review) -> RepositoryResult<Review> {
        self.check_writable()?;
        let mut reviews = self.reviews.lock().unwrap();
        if !reviews.contains_key(&review.id) {
            return Err(RepositoryError::NotFound);
        }
        reviews.insert(review.id.clone(), review.clone());
        Ok(review)
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        self.check_writable()?;
        self.reviews.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl PromotionRepository for InMemoryStore {
    async fn find_by_stall(&self, stall_ref: &str) -> RepositoryResult<Vec<Promotion>> {
        let promotions = self.promotions.lock().unwrap();
        Ok(promotions
            .values()
            .filter(|promotion| promotion.stall_ref == stall_ref)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Promotion>> {
        Ok(self.promotions.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, promotion: Promotion) -> RepositoryResult<Promotion> {
        self.check_writable()?;
        self.promotions
            .lock()
            .unwrap()
            .insert(promotion.id.clone(), promotion.clone());
        Ok(promotion)
    }

    async fn update(&self, promotion: Promotion) -> RepositoryResult<Promotion> {
        self.check_writable()?;
        let mut promotions = self.promotions.lock().unwrap();
        if !promotions.contains_key(&promotion.id) {
            return Err(RepositoryError::NotFound);
        }
        promotions.insert(promotion.id.clone(), promotion.clone());
        Ok(promotion)
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        self.check_writable()?;
        self.promotions.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, user_id: &str) -> RepositoryResult<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn create(&self, profile: UserProfile) -> RepositoryResult<UserProfile> {
        self.check_writable()?;
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(&profile.user_id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Profile already exists: {}", profile.user_id),
            });
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn update(&self, profile: UserProfile) -> RepositoryResult<UserProfile> {
        self.check_writable()?;
        let mut profiles = self.profiles.lock().unwrap();
        if !profiles.contains_key(&profile.user_id) {
            return Err(RepositoryError::NotFound);
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}

/// Build a review draft with the given rating
pub fn draft(rating: Decimal, text: &str) -> SubmitReviewRequest {
    SubmitReviewRequest {
        rating,
        text: text.to_string(),
        image_ref: None,
    }
}
