//! Login gate.
//!
//! A [`CredentialVerifier`] turns a username/password pair into an
//! [`Identity`]; a successful login stores that identity in the
//! [`SessionStore`] and hands the client an opaque session cookie.

mod credentials;
mod session;

pub use credentials::{hash_password, CredentialVerifier, Identity, StaticCredentialStore};
pub use session::{Session, SessionStore, SESSION_COOKIE};
