//! Users, profiles, delivery addresses and sign-up payloads

use super::common::{now_iso, string_enum};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

string_enum! {
    /// Account role
    UserRole {
        User => "user",
        Seller => "seller",
        Admin => "admin",
    }
}

string_enum! {
    /// Account status
    UserStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

string_enum! {
    Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

string_enum! {
    AddressType {
        Home => "home",
        Work => "work",
        Other => "other",
    }
}

fn default_address_type() -> AddressType {
    AddressType::Home
}

/// `users/{uid}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub google_id: Option<String>,
    pub email_verified: bool,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// A fresh active account; credentials live with the identity provider
    pub fn new(uid: &str, email: Option<String>, full_name: String, role: UserRole) -> Self {
        let t = now_iso();
        Self {
            id: uid.to_string(),
            email,
            password_hash: None,
            full_name,
            phone: None,
            role,
            google_id: None,
            email_verified: false,
            status: UserStatus::Active,
            created_at: t.clone(),
            updated_at: t,
        }
    }
}

/// `user_profiles/{uid}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub avatar_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
    pub preferences: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    pub fn new(uid: &str, avatar_url: Option<String>) -> Self {
        let t = now_iso();
        Self {
            id: uid.to_string(),
            user_id: uid.to_string(),
            avatar_url,
            date_of_birth: None,
            gender: None,
            bio: None,
            preferences: Map::new(),
            created_at: t.clone(),
            updated_at: t,
        }
    }
}

/// Input for account registration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 2))]
    pub full_name: String,
    pub phone: Option<String>,
}

/// Input for password sign-in
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Input for Google sign-in with a client-obtained ID token
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleAuthInput {
    #[serde(default, rename = "idToken")]
    pub id_token: String,
}

/// Input for profile updates; user and profile fields go to separate documents
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Map<String, Value>>,
}

pub const USER_FIELDS: &[&str] = &["full_name", "phone", "status"];
pub const PROFILE_FIELDS: &[&str] = &["avatar_url", "date_of_birth", "gender", "bio", "preferences"];

/// `delivery_addresses/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub id: String,
    pub user_id: String,
    pub address_type: AddressType,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub landmark: Option<String>,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating or replacing an address
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddressUpsertInput {
    pub id: Option<String>,
    pub address_id: Option<String>,
    #[serde(default = "default_address_type")]
    pub address_type: AddressType,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address_line1: String,
    pub address_line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 4, max = 10))]
    pub pincode: String,
    pub landmark: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: Option<String>,
}
