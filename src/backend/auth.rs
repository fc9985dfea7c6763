//! Glue between the external identity provider and the profile store.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::dto::UserDto;
use crate::config::Config;

/// Identity handed over by the identity provider after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    pub principal: String,
    pub display_name: Option<String>,
}

impl Authentication {
    pub fn new(principal: impl Into<String>) -> Self {
        Authentication {
            principal: principal.into(),
            display_name: None,
        }
    }
}

/// Source of "who is calling right now".
pub trait IdentityProvider {
    fn current_authentication(&self) -> Option<Authentication>;
}

impl IdentityProvider for Authentication {
    fn current_authentication(&self) -> Option<Authentication> {
        Some(self.clone())
    }
}

impl IdentityProvider for Option<Authentication> {
    fn current_authentication(&self) -> Option<Authentication> {
        self.clone()
    }
}

/// Where the browser goes once the identity provider reports a successful login.
/// Every principal is sent to the same frontend callback page.
#[derive(Debug, Clone)]
pub struct AuthSuccessRedirect {
    callback_url: String,
}

impl AuthSuccessRedirect {
    pub fn new(callback_url: impl Into<String>) -> Self {
        AuthSuccessRedirect {
            callback_url: callback_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.auth_callback_url.clone())
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn on_authentication_success(&self, authentication: &Authentication) -> Redirect {
        info!(
            principal = %authentication.principal,
            target = %self.callback_url,
            "Authentication succeeded, redirecting to frontend callback"
        );
        Redirect::to(&self.callback_url)
    }
}

/// What the frontend callback page needs to pick onboarding or the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub is_authenticated: bool,
    pub user: Option<UserDto>,
}

impl SessionSummary {
    pub fn anonymous() -> Self {
        SessionSummary {
            is_authenticated: false,
            user: None,
        }
    }
}
