//! Profiles domain - per-user post listings and account details.

pub mod actions;
pub mod forms;

pub use forms::ProfileForm;
