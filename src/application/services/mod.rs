//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **SecurityModule**: Login, token issuance and validation

pub mod security_service;

pub use security_service::{
    AccessToken, AccountCredentialVerifier, AuthError, Claims, CredentialVerifier, Credentials,
    Identity, OpenCredentialVerifier, SecurityModule,
};
