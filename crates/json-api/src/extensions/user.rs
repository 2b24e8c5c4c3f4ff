//! Authenticated user depot helpers.

use optical_store_app::domain::users::models::UserId;
use salvo::prelude::{Depot, StatusError};

const USER_ID_DEPOT_KEY: &str = "user_id";

/// Store and read the user resolved by the auth middleware.
pub(crate) trait UserDepotExt {
    fn insert_user_id(&mut self, user: UserId);

    fn user_id_or_401(&self) -> Result<UserId, StatusError>;
}

impl UserDepotExt for Depot {
    fn insert_user_id(&mut self, user: UserId) {
        self.insert(USER_ID_DEPOT_KEY, user);
    }

    fn user_id_or_401(&self) -> Result<UserId, StatusError> {
        self.get::<UserId>(USER_ID_DEPOT_KEY)
            .copied()
            .map_err(|_missing| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_user_is_returned() {
        let mut depot = Depot::new();

        depot.insert_user_id(UserId::from_i64(7));

        assert!(
            matches!(depot.user_id_or_401(), Ok(user) if user == UserId::from_i64(7)),
            "expected the inserted user"
        );
    }

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        assert!(depot.user_id_or_401().is_err(), "expected 401 without a user");
    }
}
