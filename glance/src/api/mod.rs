pub mod dto;
mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
mod routes;
mod state;

pub use extractors::{AppJson, DocumentPayload, ImagePayload, BODY_TOO_LARGE_ERROR};
pub use routes::create_router;
pub use state::AppState;
