//! The "current user" marker. There is no credential behind it: whoever holds
//! a non-empty `username` cookie is signed in under that display name.

use crate::clock::Clock;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::routes::Route;
use crate::storage::CookieJar;

pub struct SessionGuard<J, C> {
    jar: J,
    clock: C,
    cookie: String,
    lifetime: chrono::Duration,
}

impl<J: CookieJar, C: Clock> SessionGuard<J, C> {
    pub fn new(jar: J, clock: C, config: &Config) -> Self {
        Self {
            jar,
            clock,
            cookie: config.session_cookie.clone(),
            lifetime: config.session_lifetime(),
        }
    }

    pub fn get_active_user(&self) -> Option<String> {
        match self.jar.get(&self.cookie) {
            Ok(user) => user.filter(|name| !name.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session cookie: {}", e);
                None
            }
        }
    }

    pub fn start_session(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("A display name is required to start a session."));
        }
        let expires_at = self.clock.now_millis() + self.lifetime.num_milliseconds();
        self.jar.set(&self.cookie, name, expires_at)?;
        tracing::info!(user = name, "Session started");
        Ok(())
    }

    pub fn end_session(&self) -> Result<()> {
        self.jar.remove(&self.cookie)?;
        tracing::info!("Session ended");
        Ok(())
    }

    /// Where a visitor asking for `requested` actually lands.
    pub fn guard(&self, requested: Route) -> Route {
        requested.resolve(self.get_active_user().as_deref())
    }
}
