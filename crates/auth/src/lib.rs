//! OAuth2 access tokens for Google APIs.
//!
//! [`ServiceAccountTokenSource`] mints tokens with the JWT-bearer grant from a
//! service-account key and caches them until shortly before they expire.
//! [`StaticTokenSource`] hands out a fixed token (emulators, tests).

pub mod error;
pub mod token;

pub use error::AuthError;
pub use token::{
    AccessToken, ServiceAccountTokenSource, StaticTokenSource, TokenSource, CLOUD_PLATFORM_SCOPE,
};
