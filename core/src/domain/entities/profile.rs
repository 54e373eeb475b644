//! Profile record owned by USER and DEALER principals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact and business details attached to a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user (one profile per user)
    pub user_id: Uuid,

    /// Name shown to other marketplace participants
    pub display_name: String,

    pub phone: Option<String>,

    pub address: Option<String>,

    /// Trading name, dealers only
    pub company_name: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Partial update of a profile; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.company_name.is_none()
    }
}

impl Profile {
    /// Creates the profile written at registration
    pub fn new(user_id: Uuid, display_name: String, company_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            display_name,
            phone: None,
            address: None,
            company_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update and bumps `updated_at`
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(company_name) = update.company_name {
            self.company_name = Some(company_name);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_update() {
        let mut profile = Profile::new(Uuid::new_v4(), "Sunny Homes".to_string(), None);
        let created = profile.updated_at;

        profile.apply(ProfileUpdate {
            phone: Some("+61 400 000 000".to_string()),
            ..Default::default()
        });

        assert_eq!(profile.display_name, "Sunny Homes");
        assert_eq!(profile.phone.as_deref(), Some("+61 400 000 000"));
        assert!(profile.address.is_none());
        assert!(profile.updated_at >= created);
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate {
            address: Some("1 Solar St".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
