//! Profile response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use optical_store_app::domain::users::models::{Address, User, UserProfile};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: i64,
    pub email: String,

    /// `customer` or `admin`
    pub role: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_i64(),
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub id: i64,
    pub name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,

    /// ISO 3166-1 alpha-2
    pub country: String,

    pub is_default: bool,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.into_i64(),
            name: address.name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            is_default: address.is_default,
        }
    }
}

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,

    /// Saved addresses, default first
    pub addresses: Vec<AddressResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(UserProfile { user, addresses }: UserProfile) -> Self {
        let user = UserResponse::from(user);

        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }
}
