//! HTTP client for the blog platform API.
//!
//! [`BlogApi`] covers the whole REST surface; [`TokenStore`] keeps the
//! bearer token and user view between invocations so a CLI behaves like a
//! logged-in browser session.

mod error;
mod http_client;
mod token_store;
mod types;

pub use error::BlogApiError;
pub use http_client::BlogApi;
pub use token_store::{Session, TokenStore};
pub use types::{AuthResponse, Blog, BlogList, User};
