//! Actor and reference tag sets.
//!
//! Three kinds of account act on the platform: individuals (project
//! owners), design/supervision offices, and construction companies.
//! Polymorphic references (notification recipients and actors, favorite
//! items, notification targets) are tagged `{kind, id}` pairs validated
//! against the fixed sets below before anything touches the database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Party kind
// ---------------------------------------------------------------------------

/// The role of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Individual,
    Office,
    Company,
}

impl PartyKind {
    /// Tag string as stored in `recipient_type` / `actor_type` columns and
    /// carried in JWT claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Office => "office",
            Self::Company => "company",
        }
    }

    /// Parse a tag string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(Self::Individual),
            "office" => Some(Self::Office),
            "company" => Some(Self::Company),
            _ => None,
        }
    }

    /// All valid tag strings.
    pub const ALL: &'static [&'static str] = &["individual", "office", "company"];
}

impl std::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a party tag string.
pub fn validate_party_kind(kind: &str) -> Result<PartyKind, CoreError> {
    PartyKind::from_str(kind).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid account type '{kind}'. Must be one of: {}",
            PartyKind::ALL.join(", ")
        ))
    })
}

/// A tagged reference to an account: recipient or actor of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRef {
    pub kind: PartyKind,
    pub id: DbId,
}

impl PartyRef {
    pub fn individual(id: DbId) -> Self {
        Self { kind: PartyKind::Individual, id }
    }

    pub fn office(id: DbId) -> Self {
        Self { kind: PartyKind::Office, id }
    }

    pub fn company(id: DbId) -> Self {
        Self { kind: PartyKind::Company, id }
    }
}

// ---------------------------------------------------------------------------
// Favorite item kind
// ---------------------------------------------------------------------------

/// What a user may bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Office,
    Company,
    Project,
}

impl FavoriteKind {
    /// Tag string as stored in the `item_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Office => "office",
            Self::Company => "company",
            Self::Project => "project",
        }
    }

    /// Parse a tag string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "office" => Some(Self::Office),
            "company" => Some(Self::Company),
            "project" => Some(Self::Project),
            _ => None,
        }
    }

    /// All valid tag strings.
    pub const ALL: &'static [&'static str] = &["office", "company", "project"];
}

impl std::fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a favorite item tag string.
pub fn validate_favorite_kind(kind: &str) -> Result<FavoriteKind, CoreError> {
    FavoriteKind::from_str(kind).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid item type '{kind}'. Must be one of: {}",
            FavoriteKind::ALL.join(", ")
        ))
    })
}

// ---------------------------------------------------------------------------
// Notification target kind
// ---------------------------------------------------------------------------

/// The entity a notification points at, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Project,
    Review,
    UserProfile,
    OfficeProfile,
    CompanyProfile,
}

impl TargetKind {
    /// Tag string as stored in the `target_entity_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Review => "review",
            Self::UserProfile => "user_profile",
            Self::OfficeProfile => "office_profile",
            Self::CompanyProfile => "company_profile",
        }
    }

    /// Parse a tag string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "project" => Some(Self::Project),
            "review" => Some(Self::Review),
            "user_profile" => Some(Self::UserProfile),
            "office_profile" => Some(Self::OfficeProfile),
            "company_profile" => Some(Self::CompanyProfile),
            _ => None,
        }
    }

    /// All valid tag strings.
    pub const ALL: &'static [&'static str] =
        &["project", "review", "user_profile", "office_profile", "company_profile"];
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged reference to a notification's target entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: DbId,
}

impl TargetRef {
    pub fn project(id: DbId) -> Self {
        Self { kind: TargetKind::Project, id }
    }

    pub fn review(id: DbId) -> Self {
        Self { kind: TargetKind::Review, id }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_kinds_round_trip() {
        for s in PartyKind::ALL {
            assert_eq!(PartyKind::from_str(s).map(|k| k.as_str()), Some(*s));
        }
    }

    #[test]
    fn party_kind_rejects_unknown_tags() {
        assert!(PartyKind::from_str("Individual").is_none());
        assert!(PartyKind::from_str("admin").is_none());
        assert!(validate_party_kind("").is_err());
    }

    #[test]
    fn party_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PartyKind::Office).ok().as_deref(), Some("\"office\""));
        let parsed: PartyKind = serde_json::from_str("\"company\"").expect("must parse");
        assert_eq!(parsed, PartyKind::Company);
    }

    #[test]
    fn favorite_kinds_round_trip() {
        for s in FavoriteKind::ALL {
            assert_eq!(FavoriteKind::from_str(s).map(|k| k.as_str()), Some(*s));
        }
        assert!(validate_favorite_kind("user").is_err());
    }

    #[test]
    fn target_kinds_round_trip() {
        for s in TargetKind::ALL {
            assert_eq!(TargetKind::from_str(s).map(|k| k.as_str()), Some(*s));
        }
        assert!(TargetKind::from_str("profile").is_none());
    }

    #[test]
    fn party_ref_constructors_tag_correctly() {
        assert_eq!(PartyRef::individual(7).kind, PartyKind::Individual);
        assert_eq!(PartyRef::office(7).kind, PartyKind::Office);
        assert_eq!(PartyRef::company(7).kind, PartyKind::Company);
    }
}
