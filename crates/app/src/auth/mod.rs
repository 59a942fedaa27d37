//! Authentication
//!
//! Password hashing, session tokens and the gates that resolve who is acting.

mod errors;
pub mod password;
mod service;
mod token;

pub use errors::*;
pub use password::PasswordError;
pub use service::*;
pub use token::*;
