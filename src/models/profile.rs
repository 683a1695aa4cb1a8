use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{DietaryCategory, RestrictionError};

/// A dietary restriction label, normalized at construction: trimmed of
/// surrounding whitespace and upper-cased. Comparison is therefore
/// case- and whitespace-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionTag(String);

impl RestrictionTag {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the tag collides with a dietary category managed elsewhere
    pub fn is_reserved(&self) -> bool {
        DietaryCategory::ALL
            .iter()
            .any(|category| category.tag() == self.0)
    }
}

impl fmt::Display for RestrictionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered dietary restriction set for a user. Insertion order is preserved
/// for display; equality between entries is on the normalized tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionList {
    tags: Vec<RestrictionTag>,
}

impl RestrictionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a restriction. The raw value is normalized before comparison.
    /// Rejected values never mutate the list. Callers are expected to have
    /// run the required-field check on the raw input first.
    pub fn add(&mut self, raw: &str) -> Result<(), RestrictionError> {
        let tag = RestrictionTag::new(raw);

        if tag.is_reserved() {
            return Err(RestrictionError::Reserved {
                tag: tag.as_str().to_string(),
            });
        }

        if self.tags.contains(&tag) {
            return Err(RestrictionError::Duplicate {
                tag: tag.as_str().to_string(),
            });
        }

        self.tags.push(tag);
        Ok(())
    }

    /// Remove the first matching normalized tag. Removing an absent tag is
    /// a successful no-op.
    pub fn remove(&mut self, raw: &str) {
        let tag = RestrictionTag::new(raw);
        if let Some(position) = self.tags.iter().position(|existing| *existing == tag) {
            self.tags.remove(position);
        }
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.tags.contains(&RestrictionTag::new(raw))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RestrictionTag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[RestrictionTag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<RestrictionTag> for RestrictionList {
    fn from_iter<I: IntoIterator<Item = RestrictionTag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

/// A user of the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    /// Opaque image reference from the out-of-scope picker; stored and
    /// forwarded untouched
    pub avatar_ref: Option<String>,
    pub dietary_restrictions: RestrictionList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for registering a new profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfileRequest {
    pub username: String,
    pub avatar_ref: Option<String>,
}

/// Request model for updating username or avatar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub avatar_ref: Option<String>,
}

/// Login/registration form input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The acting user's session, created at login and dropped at logout.
/// Passed explicitly to any operation that needs the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new profile with generated ID and timestamps
    pub fn new(request: RegisterProfileRequest) -> Self {
        let now = Utc::now();
        Self {
            user_id: format!(
                "U{}",
                Uuid::new_v4()
                    .simple()
                    .to_string()
                    .get(0..8)
                    .unwrap_or("00000000")
            ),
            username: request.username,
            avatar_ref: request.avatar_ref,
            dietary_restrictions: RestrictionList::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the profile with new values from UpdateProfileRequest
    pub fn update(&mut self, request: UpdateProfileRequest) {
        if let Some(username) = request.username {
            self.username = username;
        }
        if let Some(avatar_ref) = request.avatar_ref {
            self.avatar_ref = Some(avatar_ref);
        }
        self.updated_at = Utc::now();
    }

    /// Replace the restriction list wholesale. Used by the commit path once
    /// the persistence collaborator has accepted the new sequence.
    pub fn set_restrictions(&mut self, restrictions: RestrictionList) {
        self.dietary_restrictions = restrictions;
        self.updated_at = Utc::now();
    }
}

impl Session {
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            username: profile.username.clone(),
            started_at: Utc::now(),
        }
    }
}
