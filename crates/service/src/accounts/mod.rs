//! User accounts: signup, login, bearer tokens and favourite movies.

pub mod errors;
pub mod service;
pub mod token;

pub use errors::AuthError;
pub use service::{AccountService, AuthSession};
pub use token::{Claims, TokenIssuer};

#[cfg(test)]
mod tests;
