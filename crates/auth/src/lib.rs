//! Authentication for the ArtCafe API
//!
//! Provides the enriched-token codec, credential validation against the auth
//! provider, provider clients, and axum extractors that work with any domain
//! state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod bearer;
mod claims;
mod codec;
mod config;
mod context;
mod error;
mod extractors;
mod orchestrator;
pub mod provider;
mod types;

pub use backend::AuthBackend;
pub use codec::TokenCodec;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::{AuthError, FailureReason};
pub use extractors::{AdminUser, AuthUser, TokenIdentity};
pub use orchestrator::{validate, Predicate, VerifiedIdentity};
pub use provider::{AuthProvider, AuthProviderFactory, ProviderError, ProviderSession, ProviderUser};
pub use types::{AuthIdentity, Credentials, Role};
