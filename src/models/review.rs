use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::TargetKind;

/// Reference to the entity a review is attached to. The entity itself is
/// owned by the external data store; the core only carries the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl ReviewTarget {
    pub fn stall(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Stall,
            id: id.into(),
        }
    }

    pub fn menu_item(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::MenuItem,
            id: id.into(),
        }
    }

    /// Composite key used by the storage layer, `kind#id`
    pub fn storage_key(&self) -> String {
        format!("{}#{}", self.kind, self.id)
    }
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// A posted review. Treated as an immutable value once created; editing
/// produces a new value that replaces the old one by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author_ref: String,
    pub target: ReviewTarget,
    pub rating: Decimal,
    pub text: String,
    /// Opaque image reference, stored and forwarded untouched
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Draft state of the review form. Submitting a valid draft consumes it;
/// the screen then rebuilds from `Default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: Decimal,
    pub text: String,
    pub image_ref: Option<String>,
}

/// Patch model for editing an existing review
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditReviewRequest {
    pub rating: Option<Decimal>,
    pub text: Option<String>,
    pub image_ref: Option<String>,
}

/// Filters applied when listing reviews for a target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewFilters {
    pub author_ref: Option<String>,
    pub min_rating: Option<Decimal>,
    pub with_image_only: Option<bool>,
}

/// Mean rating over all reviews for a target, rounded to one decimal place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRating {
    pub average: Decimal,
    pub review_count: usize,
}

impl Review {
    /// Create a new Review with generated ID and timestamps from a
    /// validated draft
    pub fn new(author_ref: String, target: ReviewTarget, draft: SubmitReviewRequest) -> Self {
        let now = Utc::now();
        Self {
            id: format!(
                "R{}",
                Uuid::new_v4()
                    .simple()
                    .to_string()
                    .get(0..8)
                    .unwrap_or("00000000")
            ),
            author_ref,
            target,
            rating: draft.rating,
            text: draft.text,
            image_ref: draft.image_ref,
            created_at: now,
            updated_at: now,
        }
    }

    /// Produce the edited review as a new value with `updated_at`
    /// refreshed. The original is never mutated in place.
    pub fn apply_patch(&self, patch: &EditReviewRequest) -> Review {
        let mut edited = self.clone();
        if let Some(rating) = patch.rating {
            edited.rating = rating;
        }
        if let Some(text) = &patch.text {
            edited.text = text.clone();
        }
        if let Some(image_ref) = &patch.image_ref {
            edited.image_ref = Some(image_ref.clone());
        }
        edited.updated_at = Utc::now();
        edited
    }

    /// Check if the review matches the given filters
    pub fn matches_filters(&self, filters: &ReviewFilters) -> bool {
        if let Some(author_ref) = &filters.author_ref {
            if &self.author_ref != author_ref {
                return false;
            }
        }

        if let Some(min_rating) = &filters.min_rating {
            if &self.rating < min_rating {
                return false;
            }
        }

        if let Some(true) = filters.with_image_only {
            if self.image_ref.is_none() {
                return false;
            }
        }

        true
    }
}

impl AggregateRating {
    /// Aggregate a collection of reviews into a mean rating.
    ///
    /// Computed as a single sum over the collection divided by the count,
    /// so the result is deterministic and invariant under permutation of
    /// the input. No reviews yields an average of 0.0.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                average: Decimal::new(0, 1),
                review_count: 0,
            };
        }

        let sum: Decimal = reviews.iter().map(|review| review.rating).sum();
        let average = (sum / Decimal::from(reviews.len()))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

        Self {
            average,
            review_count: reviews.len(),
        }
    }

    pub fn is_unrated(&self) -> bool {
        self.review_count == 0
    }
}
