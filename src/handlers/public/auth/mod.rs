// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod signin; // POST /auth/signin - authenticate and get JWT
pub mod signup; // POST /auth/signup - create account and get JWT
pub mod utils;

pub use signin::signin_post;
pub use signup::signup_post;
pub use utils::AuthDto;
