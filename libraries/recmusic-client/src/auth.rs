//! Account endpoints.

use crate::error::{ClientError, Result};
use crate::response::{self, send_error};
use crate::types::{LoginRequest, RegisterRequest, TokenPair};
use recmusic_core::User;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Authentication client for the RecMusic API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Create an account.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let url = format!("{}/api/users/register", self.base_url);
        debug!(url = %url, username = %username, "Registering account");

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        response::success(response).await?;
        info!(username = %username, "Account registered");
        Ok(())
    }

    /// Exchange credentials for a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let url = format!("{}/api/users/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let error_text = response.text().await.unwrap_or_default();
            warn!(error = %error_text, "Login failed: invalid credentials");
            return Err(ClientError::AuthFailed(
                "Invalid username or password".to_string(),
            ));
        }

        response::json(response, "login response").await
    }

    /// Fetch the profile of the token's owner.
    pub async fn profile(&self, access_token: &str) -> Result<User> {
        let url = format!("{}/api/users/profile", self.base_url);
        debug!(url = %url, "Fetching profile");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::json(response, "profile").await
    }
}
