//! Bearer-token authentication against the hosted identity provider.

mod extractor;
mod jwt;

pub use extractor::AuthenticatedUser;
pub use jwt::{AuthError, Claims, TokenVerifier, issue_token};
