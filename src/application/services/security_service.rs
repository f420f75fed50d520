//! Security Module
//!
//! Issues access tokens on login and validates them on protected requests.
//!
//! Tokens are HS256-signed JWTs carrying their own issuance and expiry
//! times, so validation needs nothing but the signing secret and the clock.
//! Which credentials are acceptable is decided by a pluggable
//! [`CredentialVerifier`].

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{AuthSettings, CredentialPolicy, JwtSettings};

/// Login input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Who a validated token was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued token. Immutable once produced.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Lifetime in whole seconds, as reported to clients.
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// JWT ID
    pub jti: String,
}

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Decides whether a login credential is acceptable.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Returns the subject to issue a token for.
    fn verify(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

/// Accepts any non-blank username; passwords are ignored.
///
/// Suits a throwaway chat where a login only picks a nickname.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCredentialVerifier;

impl CredentialVerifier for OpenCredentialVerifier {
    fn verify(&self, credentials: &Credentials) -> Result<String, AuthError> {
        Ok(credentials.username.trim().to_string())
    }
}

/// Checks username and password against configured Argon2 hashes.
#[derive(Debug, Clone, Default)]
pub struct AccountCredentialVerifier {
    accounts: HashMap<String, String>,
}

impl AccountCredentialVerifier {
    /// Build from `(username, phc_hash)` pairs. Every hash must parse.
    pub fn new<I, U, H>(accounts: I) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        let mut map = HashMap::new();
        for (username, hash) in accounts {
            let username = username.into();
            let hash = hash.into();
            PasswordHash::new(&hash).map_err(|e| {
                AuthError::Internal(format!("Invalid password hash for {}: {}", username, e))
            })?;
            map.insert(username, hash);
        }
        Ok(Self { accounts: map })
    }
}

impl CredentialVerifier for AccountCredentialVerifier {
    fn verify(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let username = credentials.username.trim();
        let password = credentials
            .password
            .as_deref()
            .ok_or(AuthError::MissingCredentials)?;
        let hash = self
            .accounts
            .get(username)
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(username.to_string())
    }
}

/// Token issuance and validation.
pub struct SecurityModule {
    verifier: Arc<dyn CredentialVerifier>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
    issuer: String,
}

impl SecurityModule {
    pub fn new(
        secret: &[u8],
        validity: Duration,
        issuer: impl Into<String>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let issuer = issuer.into();

        // Expiry is checked against our own clock with zero leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        Self {
            verifier,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            validity,
            issuer,
        }
    }

    /// Build from settings, picking the configured credential policy.
    pub fn from_settings(jwt: &JwtSettings, auth: &AuthSettings) -> Result<Self, AuthError> {
        let verifier: Arc<dyn CredentialVerifier> = match auth.policy {
            CredentialPolicy::Open => Arc::new(OpenCredentialVerifier),
            CredentialPolicy::Accounts => Arc::new(AccountCredentialVerifier::new(
                auth.accounts
                    .iter()
                    .map(|a| (a.username.clone(), a.password_hash.clone())),
            )?),
        };

        Ok(Self::new(
            jwt.secret_bytes(),
            jwt.validity(),
            jwt.issuer.clone(),
            verifier,
        ))
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Verify credentials and issue a token valid from now.
    pub fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        self.login_at(credentials, Utc::now())
    }

    /// Verify credentials and issue a token valid from `now`.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub fn login_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        if credentials.username.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let subject = self.verifier.verify(credentials)?;

        // Truncate to whole seconds so the token and the returned times agree
        let issued_at = timestamp(now.timestamp());
        let expires_at = issued_at.and_then(|t| t.checked_add_signed(self.validity));
        let (Some(issued_at), Some(expires_at)) = (issued_at, expires_at) else {
            return Err(AuthError::Internal(format!(
                "Token expiry out of range for issuance at {}",
                now
            )));
        };

        let claims = Claims {
            sub: subject,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            iss: self.issuer.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        debug!(subject = %claims.sub, expires_at = %expires_at, "Token issued");

        Ok(AccessToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Check a presented token against the current time.
    pub fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Check a presented token as of `now`.
    ///
    /// Fails for empty, malformed, re-signed or altered tokens, and for
    /// tokens whose expiry is at or before `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?
            .claims;

        if claims.iat > claims.exp || claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        if claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(Identity {
            subject: claims.sub,
            expires_at: timestamp(claims.exp).ok_or(AuthError::InvalidToken)?,
        })
    }
}

fn timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}
