//! Auth Client
//!
//! Login and signup against the travel server's `/auth` routes.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::UserProfile;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid e-mail pattern"));

const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Caught before anything was sent
    #[error("{0}")]
    Invalid(String),
    /// The server answered with a refusal
    #[error("{0}")]
    Rejected(String),
    #[error("Could not reach the server: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [&self.name, &self.email, &self.password, &self.phone];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(AuthError::Invalid("Please fill in all fields".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Invalid("Passwords do not match".to_string()));
        }
        if !EMAIL_REGEX.is_match(self.email.trim()) {
            return Err(AuthError::Invalid("Please enter a valid email address".to_string()));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    phone: &'a str,
}

#[derive(Deserialize, Default)]
struct AuthResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Deserialize)]
struct AuthUser {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub profile: UserProfile,
    pub token: String,
}

pub struct AuthClient {
    client: reqwest::Client,
    base: Url,
}

impl AuthClient {
    pub fn new(client: reqwest::Client, server_url: &str) -> Result<Self, AuthError> {
        let normalized = format!("{}/", server_url.trim_end_matches('/'));
        let base = Url::parse(&normalized)
            .map_err(|e| AuthError::Invalid(format!("Invalid server address {}: {}", server_url, e)))?;
        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url, AuthError> {
        self.base
            .join(path)
            .map_err(|e| AuthError::Invalid(e.to_string()))
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(bool, AuthResponse), AuthError> {
        let response = self.client.post(self.url(path)?).json(body).send().await?;
        let ok = response.status().is_success();
        let bytes = response.bytes().await?;
        // Error pages without JSON still carry the status
        let parsed = serde_json::from_slice::<AuthResponse>(&bytes).unwrap_or_default();
        Ok((ok, parsed))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Invalid("Please enter email and password".to_string()));
        }

        let (ok, response) = self
            .post("auth/login", &LoginBody { email: email.trim(), password })
            .await?;

        let name = response.user.as_ref().and_then(|user| user.name.clone());
        match (ok, response.token, name) {
            (true, Some(token), Some(name)) if !token.is_empty() && !name.is_empty() => {
                let email = response
                    .user
                    .and_then(|user| user.email)
                    .unwrap_or_else(|| email.trim().to_string());
                log::info!("login accepted for {}", email);
                Ok(LoginOutcome {
                    profile: UserProfile {
                        name,
                        email: Some(email),
                        signed_in_at: Some(chrono::Local::now().timestamp_millis()),
                    },
                    token,
                })
            }
            _ => Err(AuthError::Rejected(
                response.message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            )),
        }
    }

    /// Register a new account; returns the profile to remember locally
    pub async fn signup(&self, request: &SignupRequest) -> Result<UserProfile, AuthError> {
        request.validate()?;

        let body = SignupBody {
            name: request.name.trim(),
            email: request.email.trim(),
            password: &request.password,
            phone: request.phone.trim(),
        };
        let (ok, response) = self.post("auth/signup", &body).await?;

        if ok && response.success {
            log::info!("signup accepted for {}", body.email);
            Ok(UserProfile {
                name: body.name.to_string(),
                email: None,
                signed_in_at: None,
            })
        } else {
            Err(AuthError::Rejected(
                response.message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            ))
        }
    }
}
