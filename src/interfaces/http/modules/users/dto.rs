//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{BloodGroup, DomainResult, DonorSearch, NewUser, ProfileUpdate, User};

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// One of A+, A-, B+, B-, AB+, AB-, O+, O-
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upazila: Option<String>,
    /// donor | volunteer | admin
    pub role: String,
    /// active | blocked
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            avatar: u.avatar,
            blood_group: u.blood_group.map(|g| g.as_str().to_string()),
            district: u.district,
            upazila: u.upazila,
            role: u.role.as_str().to_string(),
            status: u.status.as_str().to_string(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

fn parse_blood_group(raw: Option<&str>) -> DomainResult<Option<BloodGroup>> {
    raw.map(|s| s.parse::<BloodGroup>()).transpose()
}

/// Registration body. Role and status are not accepted: every new user is
/// an active donor.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(url)]
    pub avatar: Option<String>,
    pub blood_group: Option<String>,
    #[validate(length(max = 100))]
    pub district: Option<String>,
    #[validate(length(max = 100))]
    pub upazila: Option<String>,
}

impl RegisterRequest {
    pub fn into_domain(self) -> DomainResult<NewUser> {
        Ok(NewUser {
            blood_group: parse_blood_group(self.blood_group.as_deref())?,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
            district: self.district,
            upazila: self.upazila,
        })
    }
}

/// Profile update body. `_id`, `email`, `role` and `status` are not part of
/// the accepted field set and are dropped if sent.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(url)]
    pub avatar: Option<String>,
    pub blood_group: Option<String>,
    #[validate(length(max = 100))]
    pub district: Option<String>,
    #[validate(length(max = 100))]
    pub upazila: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_domain(self) -> DomainResult<ProfileUpdate> {
        Ok(ProfileUpdate {
            blood_group: parse_blood_group(self.blood_group.as_deref())?,
            name: self.name,
            avatar: self.avatar,
            district: self.district,
            upazila: self.upazila,
        })
    }
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// active | blocked | all
    pub status: Option<String>,
}

/// Donor search query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DonorSearchParams {
    /// Percent-encode the sign, e.g. `O%2B`
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

impl DonorSearchParams {
    /// Empty values mean "any".
    pub fn into_domain(self) -> DomainResult<DonorSearch> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let blood_group = non_empty(self.blood_group);
        Ok(DonorSearch {
            blood_group: parse_blood_group(blood_group.as_deref())?,
            district: non_empty(self.district),
            upazila: non_empty(self.upazila),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn unknown_profile_keys_are_dropped() {
        let body: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "_id": "forged",
            "email": "other@example.com",
            "role": "admin",
            "district": "Sylhet"
        }))
        .unwrap();

        let update = body.into_domain().unwrap();
        assert_eq!(update.district.as_deref(), Some("Sylhet"));
        assert!(update.name.is_none());
    }

    #[test]
    fn unknown_blood_group_is_rejected() {
        let body: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "N",
            "email": "n@example.com",
            "bloodGroup": "C+"
        }))
        .unwrap();
        assert!(matches!(body.into_domain(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn dto_uses_mongo_style_id() {
        let user = User::register(
            "u1",
            NewUser {
                name: "N".into(),
                email: "n@example.com".into(),
                avatar: None,
                blood_group: Some(BloodGroup::AbPositive),
                district: None,
                upazila: None,
            },
        );
        let json = serde_json::to_value(UserDto::from(user)).unwrap();
        assert_eq!(json["_id"], "u1");
        assert_eq!(json["bloodGroup"], "AB+");
        assert_eq!(json["role"], "donor");
        assert!(json.get("district").is_none());
    }
}
