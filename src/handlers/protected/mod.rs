// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, which injects
// `AuthUser` into request extensions.

pub mod bookmarks;
pub mod users;

pub use bookmarks::*;
pub use users::*;
