//! Current user session.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::auth::User;

/// The signed-in user, observable by anything holding a receiver.
///
/// Adding products and prices is only offered while a user is present.
#[derive(Debug, Clone)]
pub struct Session {
    sender: Arc<watch::Sender<Option<User>>>,
}

impl Session {
    /// A session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        let (sender, _receiver) = watch::channel(None);

        Self {
            sender: Arc::new(sender),
        }
    }

    /// A session with `user` already signed in.
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        let session = Self::anonymous();

        session.sign_in(user);

        session
    }

    pub fn sign_in(&self, user: User) {
        info!(user = %user.uuid, "user signed in");

        self.sender.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if self.sender.send_replace(None).is_some() {
            info!("user signed out");
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.sender.borrow().clone()
    }

    /// Watch for sign-in and sign-out.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.sender.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}
