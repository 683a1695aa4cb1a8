use chrono::NaiveDate;
use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Review not found: {id}")]
    ReviewNotFound { id: String },

    #[error("Promotion not found: {id}")]
    PromotionNotFound { id: String },

    #[error("Profile not found: {user_id}")]
    ProfileNotFound { user_id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Restriction error: {source}")]
    Restriction {
        #[from]
        source: RestrictionError,
    },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Data store connection failed")]
    ConnectionFailed,

    #[error("Item not found")]
    NotFound,

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("AWS SDK error: {message}")]
    AwsSdk { message: String },

    #[error("DynamoDB table not found: {table_name}. Ensure the table exists and IAM permissions are correct.")]
    TableNotFound { table_name: String },

    #[error("Malformed item: {message}")]
    MalformedItem { message: String },

    #[error("Timeout occurred during operation")]
    Timeout,
}

/// Validation errors for input data. Local, synchronous, recoverable;
/// the caller renders the message next to the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}, expected={expected}")]
    InvalidFormat { field: String, expected: String },

    #[error("Rating out of range: {value}, must be between 0 and 5")]
    RatingOutOfRange { value: String },

    #[error("Review text cannot be empty")]
    EmptyText,

    #[error("Invalid promotion window: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },
}

/// Errors from the dietary restriction list. Validation-grade: they set a
/// user-visible message and never mutate the list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestrictionError {
    #[error("Restriction already added: {tag}")]
    Duplicate { tag: String },

    #[error("{tag} is a dietary category, not a restriction")]
    Reserved { tag: String },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
