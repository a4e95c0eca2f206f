// Blog server - core library
//
// Posts organized by category and location, scheduled publication, comments.
// Domain models and actions live under domains/*, HTTP wiring under server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
