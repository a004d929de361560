// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition plus the service banner and health probe.

pub mod auth;
pub mod system;

pub use auth::*;
pub use system::{health_get, root_get};
