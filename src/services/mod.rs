// Services module - business logic layer

pub mod profile_service;
pub mod promotion_service;
pub mod review_service;

pub use profile_service::ProfileService;
pub use promotion_service::PromotionService;
pub use review_service::{ReviewPolicy, ReviewService};
