// Business domains
pub mod auth;
pub mod categories;
pub mod comments;
pub mod locations;
pub mod pages;
pub mod posts;
pub mod profiles;
