pub mod analyze;
pub mod auth;
pub(crate) mod health;

pub use analyze::{analyze_document, analyze_image};
pub use auth::{check_auth, login, logout};
pub use health::health_check;
