use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of entities a review can be attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Stall,
    MenuItem,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Stall => write!(f, "stall"),
            TargetKind::MenuItem => write!(f, "menu_item"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stall" => Ok(TargetKind::Stall),
            "menu_item" => Ok(TargetKind::MenuItem),
            _ => Err(format!("Invalid target kind: {}", s)),
        }
    }
}

/// Derived validity status of a promotion, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
    Upcoming,
    Active,
    Expired,
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromotionStatus::Upcoming => write!(f, "upcoming"),
            PromotionStatus::Active => write!(f, "active"),
            PromotionStatus::Expired => write!(f, "expired"),
        }
    }
}

impl FromStr for PromotionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(PromotionStatus::Upcoming),
            "active" => Ok(PromotionStatus::Active),
            "expired" => Ok(PromotionStatus::Expired),
            _ => Err(format!("Invalid promotion status: {}", s)),
        }
    }
}

/// Dietary categories managed as stall attributes elsewhere in the app.
/// Their tags are reserved and may not be added as free-form restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryCategory {
    Halal,
    Vegetarian,
}

impl DietaryCategory {
    pub const ALL: [DietaryCategory; 2] = [DietaryCategory::Halal, DietaryCategory::Vegetarian];

    /// The normalized tag form this category reserves
    pub fn tag(&self) -> &'static str {
        match self {
            DietaryCategory::Halal => "HALAL",
            DietaryCategory::Vegetarian => "VEGETARIAN",
        }
    }
}

impl fmt::Display for DietaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietaryCategory::Halal => write!(f, "halal"),
            DietaryCategory::Vegetarian => write!(f, "vegetarian"),
        }
    }
}

impl FromStr for DietaryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "halal" => Ok(DietaryCategory::Halal),
            "vegetarian" => Ok(DietaryCategory::Vegetarian),
            _ => Err(format!("Invalid dietary category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_kind_string_conversion() {
        assert_eq!(TargetKind::Stall.to_string(), "stall");
        assert_eq!(TargetKind::MenuItem.to_string(), "menu_item");

        assert_eq!("stall".parse::<TargetKind>().unwrap(), TargetKind::Stall);
        assert_eq!(
            "MENU_ITEM".parse::<TargetKind>().unwrap(),
            TargetKind::MenuItem
        );

        assert!("invalid".parse::<TargetKind>().is_err());
    }

    #[test]
    fn test_promotion_status_string_conversion() {
        assert_eq!(PromotionStatus::Upcoming.to_string(), "upcoming");
        assert_eq!(PromotionStatus::Active.to_string(), "active");
        assert_eq!(PromotionStatus::Expired.to_string(), "expired");

        assert_eq!(
            "active".parse::<PromotionStatus>().unwrap(),
            PromotionStatus::Active
        );
        assert_eq!(
            "EXPIRED".parse::<PromotionStatus>().unwrap(),
            PromotionStatus::Expired
        );

        assert!("invalid".parse::<PromotionStatus>().is_err());
    }

    #[test]
    fn test_dietary_category_tags() {
        assert_eq!(DietaryCategory::Halal.tag(), "HALAL");
        assert_eq!(DietaryCategory::Vegetarian.tag(), "VEGETARIAN");
        assert_eq!(DietaryCategory::ALL.len(), 2);
    }

    #[test]
    fn test_serde_serialization() {
        let kind = TargetKind::MenuItem;
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"menu_item\"");

        let deserialized: TargetKind = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TargetKind::MenuItem);

        let status = PromotionStatus::Upcoming;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"upcoming\"");
    }
}
