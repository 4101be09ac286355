//! Mock sign-in and sign-up. Nothing is checked against an account store:
//! a form that passes the non-empty checks yields the display name for the
//! new session.

use crate::error::{AppError, Result, SIGN_IN_MESSAGE, SIGN_UP_MESSAGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn welcome_title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Hello, Friend!",
            AuthMode::SignUp => "Welcome Back!",
        }
    }

    pub fn welcome_text(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Register with your personal details to use all of site features.",
            AuthMode::SignUp => "Sign in with your credentials to continue using the site.",
        }
    }

    /// Label of the welcome panel button, which switches to the other form.
    pub fn switch_label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "SIGN UP",
            AuthMode::SignUp => "SIGN IN",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthForm {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    /// Display name to start the session with, or the inline error message.
    pub fn submit(&self, mode: AuthMode) -> Result<String> {
        match mode {
            AuthMode::SignIn => {
                if self.username.trim().is_empty() || self.password.trim().is_empty() {
                    return Err(AppError::validation(SIGN_IN_MESSAGE));
                }
                Ok(self.username.clone())
            }
            AuthMode::SignUp => {
                if self.name.trim().is_empty() {
                    return Err(AppError::validation(SIGN_UP_MESSAGE));
                }
                Ok(self.name.clone())
            }
        }
    }
}
