//! HTTP boundary: hyper server, routing for `/me`, JSON error bodies,
//! and session cookies.

pub mod cookie;
pub mod error;
pub mod server;

pub use cookie::{CookieConfig, SessionCookie};
pub use server::{AppState, ProfileServer};
