//! User entity representing a registered principal in the SolarLink system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a principal. Fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// A homeowner browsing packages and requesting quotes
    User,
    /// An installer offering packages and answering quotes
    Dealer,
    /// Marketplace operator
    Admin,
}

impl Role {
    /// Database and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Dealer => "DEALER",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether a principal may pick this role when registering
    pub fn is_self_registrable(&self) -> bool {
        !matches!(self, Role::Admin)
    }

    /// Whether principals with this role own a profile record
    pub fn has_profile(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "DEALER" => Ok(Role::Dealer),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// User entity representing a registered principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Lower-cased, unique email address
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role assigned at registration
    pub role: Role,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: String, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_dealer(&self) -> bool {
        self.role == Role::Dealer
    }
}
