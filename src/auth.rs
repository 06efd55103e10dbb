//! Admin authorization for resetting a session.
//!
//! Resetting throws away the current maze and progress, so it is gated behind a shared secret.
//! A successful unlock yields an [`AdminToken`], which is the only thing
//! [`Game::reset`](crate::game::Game::reset) accepts as proof of authorization.

use std::fmt;

use tracing::{info, warn};

use crate::game::Notification;

/// Proof that the admin credential was entered correctly.
///
/// The private field keeps the token from being built anywhere but [`AdminGate::unlock`].
#[derive(Debug, PartialEq, Eq)]
pub struct AdminToken(());

/// Shared-secret check guarding the reset operation.
pub struct AdminGate {
    /// Configured secret, or [`None`] when resets are disabled.
    secret: Option<String>,
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AdminGate")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminGate {
    /// Builds a gate around an optional secret.
    ///
    /// With no secret every unlock attempt fails.
    pub const fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Returns whether a secret is configured at all.
    pub const fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Compares `attempt` against the configured secret.
    ///
    /// # Errors
    ///
    /// This function returns [`Notification::IncorrectCredential`] when the attempt does not
    /// match or no secret is configured.
    pub fn unlock(&self, attempt: &str) -> Result<AdminToken, Notification> {
        match &self.secret {
            Some(secret) if secret == attempt => {
                info!("admin unlock granted");
                Ok(AdminToken(()))
            }
            Some(_) => {
                warn!("admin unlock rejected: incorrect credential");
                Err(Notification::IncorrectCredential)
            }
            None => {
                warn!("admin unlock rejected: no admin secret configured");
                Err(Notification::IncorrectCredential)
            }
        }
    }
}
