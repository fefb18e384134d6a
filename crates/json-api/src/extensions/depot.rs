//! Depot helper extensions.

use std::any::Any;

use cuantovale_app::auth::User;
use salvo::prelude::{Depot, StatusError};

const USER_DEPOT_KEY: &str = "cuantovale.user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the user a request was authenticated as.
    fn insert_user(&mut self, user: User);

    /// The authenticated user, or 401 when the request carried no valid token.
    fn user_or_401(&self) -> Result<&User, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user(&mut self, user: User) {
        self.insert(USER_DEPOT_KEY, user);
    }

    fn user_or_401(&self) -> Result<&User, StatusError> {
        self.get::<User>(USER_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
