pub mod auth;
pub mod bookmark;
pub mod server;
pub mod user;
