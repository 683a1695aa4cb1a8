use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    CreatePromotionRequest, Credentials, EditReviewRequest, RegisterProfileRequest,
    SubmitReviewRequest, UpdatePromotionRequest, UpdateProfileRequest, ValidationError,
    ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_REVIEW_TEXT_LENGTH: usize = 1000;
pub const MAX_PROMOTION_TITLE_LENGTH: usize = 100;
pub const MAX_PROMOTION_DESCRIPTION_LENGTH: usize = 500;
pub const MIN_RATING: Decimal = Decimal::from_parts(0, 0, 0, false, 0);
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

impl Validate for Credentials {
    /// Fields are checked in form order: no password error is raised until
    /// the email passes.
    fn validate(&self) -> ValidationResult<()> {
        validate_required("email", &self.email)?;
        validate_email_format(&self.email)?;
        validate_required("password", &self.password)?;
        Ok(())
    }
}

impl Validate for SubmitReviewRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_rating(&self.rating)?;
        validate_review_text_length(&self.text)?;
        Ok(())
    }
}

impl Validate for EditReviewRequest {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(rating) = &self.rating {
            validate_rating(rating)?;
        }
        if let Some(text) = &self.text {
            validate_review_text_length(text)?;
        }
        Ok(())
    }
}

impl Validate for CreatePromotionRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("stall_ref", &self.stall_ref)?;
        validate_required("title", &self.title)?;
        validate_promotion_title(&self.title)?;
        validate_promotion_description(&self.description)?;
        validate_promotion_window(self.start_date, self.end_date.as_ref())?;
        Ok(())
    }
}

impl Validate for UpdatePromotionRequest {
    /// Field-level checks only. The merged date window is re-checked by the
    /// service once the patch is applied to the existing promotion.
    fn validate(&self) -> ValidationResult<()> {
        if let Some(title) = &self.title {
            validate_required("title", title)?;
            validate_promotion_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_promotion_description(description)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            validate_promotion_window(start, Some(&end))?;
        }
        Ok(())
    }
}

impl Validate for RegisterProfileRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_username(&self.username)?;
        Ok(())
    }
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        Ok(())
    }
}

/// Validate that a field has a non-empty value after trimming
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validate a conventional `local@domain` email shape
pub fn validate_email_format(value: &str) -> ValidationResult<()> {
    let trimmed = value.trim();

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        expected: "local@domain format (e.g. user@example.com)".to_string(),
    };

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.is_empty() {
        return Err(invalid());
    }

    if trimmed.chars().any(char::is_whitespace) || domain.contains('@') {
        return Err(invalid());
    }

    // The domain needs at least one dot with non-empty labels on both sides
    if !domain.split('.').all(|label| !label.is_empty()) || !domain.contains('.') {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a review rating is within [0, 5]
pub fn validate_rating(rating: &Decimal) -> ValidationResult<()> {
    if *rating < MIN_RATING || *rating > MAX_RATING {
        return Err(ValidationError::RatingOutOfRange {
            value: rating.to_string(),
        });
    }

    Ok(())
}

/// Validate review text against the configured policy. When `required` is
/// set, blank text is rejected.
pub fn validate_review_text(text: &str, required: bool) -> ValidationResult<()> {
    if required && text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    validate_review_text_length(text)
}

fn validate_review_text_length(text: &str) -> ValidationResult<()> {
    let trimmed = text.trim();

    if trimmed.len() > MAX_REVIEW_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "review_text".to_string(),
            max_length: MAX_REVIEW_TEXT_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate a promotion's date window. A single-day promotion
/// (start == end) is valid.
pub fn validate_promotion_window(
    start: NaiveDate,
    end: Option<&NaiveDate>,
) -> ValidationResult<()> {
    if let Some(end) = end {
        if *end < start {
            return Err(ValidationError::InvalidRange { start, end: *end });
        }
    }

    Ok(())
}

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<()> {
    validate_required("username", username)?;

    let trimmed = username.trim();
    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max_length: MAX_USERNAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

fn validate_promotion_title(title: &str) -> ValidationResult<()> {
    let trimmed = title.trim();

    if trimmed.len() > MAX_PROMOTION_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "promotion_title".to_string(),
            max_length: MAX_PROMOTION_TITLE_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

fn validate_promotion_description(description: &str) -> ValidationResult<()> {
    let trimmed = description.trim();

    if trimmed.len() > MAX_PROMOTION_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "promotion_description".to_string(),
            max_length: MAX_PROMOTION_DESCRIPTION_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}
