//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::BloodGroup;
use crate::shared::DomainError;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Donor,
    Volunteer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Volunteer => "volunteer",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Self::Donor),
            "volunteer" => Ok(Self::Volunteer),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::Validation(format!("Unknown role: '{}'", s))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status. Only active users may open donation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }

    /// Parse an optional list filter where `all` (or an empty value) means
    /// "no filter".
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            _ => Err(DomainError::Validation(format!("Unknown user status: '{}'", s))),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered platform user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Natural key, unique across users
    pub email: String,
    pub avatar: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user. Role and status are always the
    /// defaults, whatever the client asked for.
    pub fn register(id: impl Into<String>, input: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: input.name,
            email: input.email,
            avatar: input.avatar,
            blood_group: input.blood_group,
            district: input.district,
            upazila: input.upazila,
            role: UserRole::Donor,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Merge a profile patch. Returns `true` when any field changed.
    pub fn apply_profile_update(&mut self, update: &ProfileUpdate) -> bool {
        let before = self.clone();

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(avatar) = &update.avatar {
            self.avatar = Some(avatar.clone());
        }
        if let Some(group) = update.blood_group {
            self.blood_group = Some(group);
        }
        if let Some(district) = &update.district {
            self.district = Some(district.clone());
        }
        if let Some(upazila) = &update.upazila {
            self.upazila = Some(upazila.clone());
        }

        let changed = *self != before;
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    pub fn set_status(&mut self, status: UserStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = Utc::now();
        true
    }

    pub fn set_role(&mut self, role: UserRole) -> bool {
        if self.role == role {
            return false;
        }
        self.role = role;
        self.updated_at = Utc::now();
        true
    }

    /// Whether this user shows up in a donor search with the given filters.
    pub fn matches_donor_search(&self, search: &DonorSearch) -> bool {
        self.role == UserRole::Donor
            && self.status == UserStatus::Active
            && search.blood_group.map_or(true, |g| self.blood_group == Some(g))
            && search
                .district
                .as_deref()
                .map_or(true, |d| self.district.as_deref() == Some(d))
            && search
                .upazila
                .as_deref()
                .map_or(true, |u| self.upazila.as_deref() == Some(u))
    }
}

/// Registration input. Role and status are not accepted here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// Partial profile update. Identity (id, email) and role have no field here,
/// so they cannot be changed through this path.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// Active-donor search filters; `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct DonorSearch {
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::register(
            "u-1",
            NewUser {
                name: "Rahim".into(),
                email: "rahim@example.com".into(),
                avatar: None,
                blood_group: Some(BloodGroup::OPositive),
                district: Some("Dhaka".into()),
                upazila: Some("Savar".into()),
            },
        )
    }

    #[test]
    fn registered_user_is_active_donor() {
        let u = sample_user();
        assert_eq!(u.role, UserRole::Donor);
        assert_eq!(u.status, UserStatus::Active);
        assert!(u.is_active());
    }

    #[test]
    fn profile_update_reports_changes() {
        let mut u = sample_user();
        let update = ProfileUpdate {
            district: Some("Khulna".into()),
            ..Default::default()
        };
        assert!(u.apply_profile_update(&update));
        assert_eq!(u.district.as_deref(), Some("Khulna"));
        assert_eq!(u.email, "rahim@example.com");

        // Same value again is not a modification
        assert!(!u.apply_profile_update(&update));
    }

    #[test]
    fn blocking_twice_modifies_once() {
        let mut u = sample_user();
        assert!(u.set_status(UserStatus::Blocked));
        assert!(!u.set_status(UserStatus::Blocked));
        assert!(!u.is_active());
    }

    #[test]
    fn donor_search_requires_active_donor() {
        let mut u = sample_user();
        let search = DonorSearch {
            blood_group: Some(BloodGroup::OPositive),
            district: Some("Dhaka".into()),
            upazila: None,
        };
        assert!(u.matches_donor_search(&search));

        u.set_role(UserRole::Volunteer);
        assert!(!u.matches_donor_search(&search));

        u.set_role(UserRole::Donor);
        u.set_status(UserStatus::Blocked);
        assert!(!u.matches_donor_search(&search));
    }

    #[test]
    fn donor_search_narrows_on_each_field() {
        let u = sample_user();
        let wrong_group = DonorSearch {
            blood_group: Some(BloodGroup::ANegative),
            ..Default::default()
        };
        let wrong_upazila = DonorSearch {
            upazila: Some("Dhamrai".into()),
            ..Default::default()
        };
        assert!(!u.matches_donor_search(&wrong_group));
        assert!(!u.matches_donor_search(&wrong_upazila));
        assert!(u.matches_donor_search(&DonorSearch::default()));
    }

    #[test]
    fn status_filter_all_means_none() {
        assert_eq!(UserStatus::parse_filter(Some("all")).unwrap(), None);
        assert_eq!(UserStatus::parse_filter(None).unwrap(), None);
        assert_eq!(
            UserStatus::parse_filter(Some("blocked")).unwrap(),
            Some(UserStatus::Blocked)
        );
        assert!(UserStatus::parse_filter(Some("sleeping")).is_err());
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
