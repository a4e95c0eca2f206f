//! Auth domain - user accounts and session tokens
//!
//! Responsibilities:
//! - Registration with Argon2id password hashing
//! - Login issuing a signed JWT (stored client-side in a cookie)
//! - Logout

pub mod actions;
pub mod forms;
pub mod jwt;
pub mod models;
pub mod password;

pub use forms::{LoginForm, RegistrationForm};
pub use jwt::{Claims, JwtService};
pub use models::User;
