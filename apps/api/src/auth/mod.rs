//! Authentication: Argon2 password hashing, HMAC-signed bearer tokens and
//! the middleware that resolves a token to the calling user.

pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::TokenKeys;
pub use middleware::{require_auth, CurrentUser};
