pub mod admin;
pub mod auth;
pub mod bootstrap;
pub mod chat;
pub mod directory;
pub mod error;
pub mod middleware;
pub mod ratings;
pub mod routes;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, AppStateInner, SessionSettings};
