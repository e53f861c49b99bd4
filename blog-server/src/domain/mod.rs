pub mod blog;
pub mod error;
pub mod user;
