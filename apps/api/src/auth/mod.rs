// Identity: bcrypt password hashing, HS256 bearer tokens, and the extractor
// that guards protected routes.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod service;
pub mod token;

pub use extractor::AuthUser;
pub use token::TokenIssuer;
