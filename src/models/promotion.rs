use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PromotionStatus;

/// A stall promotion with a validity window of calendar dates. Dates carry
/// no timezone; the window is evaluated against the caller's local date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub stall_ref: String,
    pub title: String,
    pub description: String,
    /// Opaque image reference, stored and forwarded untouched
    pub image_ref: Option<String>,
    pub start_date: NaiveDate,
    /// Absent for open-ended promotions
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a new promotion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePromotionRequest {
    pub stall_ref: String,
    pub title: String,
    pub description: String,
    pub image_ref: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Request model for updating an existing promotion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Promotion {
    /// Create a new Promotion with generated ID and timestamps. The request
    /// is expected to have passed window validation.
    pub fn new(request: CreatePromotionRequest) -> Self {
        let now = Utc::now();
        Self {
            id: format!(
                "P{}",
                Uuid::new_v4()
                    .simple()
                    .to_string()
                    .get(0..8)
                    .unwrap_or("00000000")
            ),
            stall_ref: request.stall_ref,
            title: request.title,
            description: request.description,
            image_ref: request.image_ref,
            start_date: request.start_date,
            end_date: request.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derive the promotion's validity status for the given calendar date.
    /// Pure function of `(start_date, end_date, today)`.
    pub fn status(&self, today: NaiveDate) -> PromotionStatus {
        if today < self.start_date {
            return PromotionStatus::Upcoming;
        }

        match self.end_date {
            Some(end) if today > end => PromotionStatus::Expired,
            _ => PromotionStatus::Active,
        }
    }

    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.status(today) == PromotionStatus::Active
    }

    /// Render the validity window as `DD/MM/YY to DD/MM/YY`, or
    /// `DD/MM/YY to No end date` for open-ended promotions. This is the
    /// single formatting authority; screens never format dates themselves.
    pub fn format_range(&self) -> String {
        let start = self.start_date.format("%d/%m/%y");
        match self.end_date {
            Some(end) => format!("{} to {}", start, end.format("%d/%m/%y")),
            None => format!("{} to No end date", start),
        }
    }

    /// Update the promotion with new values from UpdatePromotionRequest.
    /// The caller re-validates the merged window before persisting.
    pub fn update(&mut self, request: UpdatePromotionRequest) {
        if let Some(title) = request.title {
            self.title = title;
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if let Some(image_ref) = request.image_ref {
            self.image_ref = Some(image_ref);
        }
        if let Some(start_date) = request.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            self.end_date = Some(end_date);
        }
        self.updated_at = Utc::now();
    }
}
