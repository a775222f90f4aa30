use reqwest::Client;
use serde::Deserialize;

use super::{
    RemoteConfig,
    Session,
};
use crate::core::MedidictError;

/// Bare usernames are turned into addresses under this domain before they
/// reach the backend, which only knows email-shaped identities.
const SYNTHETIC_EMAIL_DOMAIN: &str = "users.medidict.app";

pub fn canonicalize_identifier(identifier: &str) -> String {
    let identifier = identifier.trim().to_lowercase();
    if identifier.contains('@') {
        identifier
    } else {
        format!("{}@{}", identifier, SYNTHETIC_EMAIL_DOMAIN)
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
    error_description: Option<String>,
    msg: Option<String>,
}

pub struct AuthClient {
    client: Client,
    config: RemoteConfig,
}

impl AuthClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self { client: Client::new(), config }
    }

    pub async fn sign_up(&self, identifier: &str, secret: &str) -> Result<Session, MedidictError> {
        let url = format!("{}/auth/v1/signup", self.config.url);
        self.request(&url, identifier, secret).await
    }

    pub async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Session, MedidictError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.config.url);
        self.request(&url, identifier, secret).await
    }

    pub async fn sign_out(&self, session: &Session) -> Result<(), MedidictError> {
        let url = format!("{}/auth/v1/logout", self.config.url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MedidictError::Remote {
                status: status.as_u16(),
                message: "sign-out rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn request(
        &self,
        url: &str,
        identifier: &str,
        secret: &str,
    ) -> Result<Session, MedidictError> {
        let email = canonicalize_identifier(identifier);
        let body = serde_json::json!({ "email": email, "password": secret });

        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let parsed: AuthResponse = response.json().await?;

        if !status.is_success() {
            let message = parsed
                .error_description
                .or(parsed.msg)
                .unwrap_or_else(|| "authentication failed".to_string());
            return Err(MedidictError::Remote { status: status.as_u16(), message });
        }

        let access_token = parsed
            .access_token
            .ok_or_else(|| MedidictError::Custom("no access token in auth response".to_string()))?;
        let email = parsed.user.and_then(|user| user.email).unwrap_or(email);

        Ok(Session { access_token, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_username_becomes_synthetic_email() {
        assert_eq!(canonicalize_identifier("Nurse1"), "nurse1@users.medidict.app");
    }

    #[test]
    fn real_email_is_only_normalized() {
        assert_eq!(canonicalize_identifier("  Me@Example.COM "), "me@example.com");
    }
}
