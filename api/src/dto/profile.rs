use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use solar_core::domain::entities::profile::{Profile, ProfileUpdate};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name,
            phone: profile.phone,
            address: profile.address,
            company_name: profile.company_name,
            updated_at: profile.updated_at,
        }
    }
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub display_name: Option<String>,

    #[validate(length(min = 7, max = 32))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 160))]
    pub company_name: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            display_name: request.display_name,
            phone: request.phone,
            address: request.address,
            company_name: request.company_name,
        }
    }
}
