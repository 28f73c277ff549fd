//! Remote document store client and its per-collection resources.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod home;
pub mod pages;
pub mod upload;

pub use auth::SessionRestore;
pub use client::{unwrap_payload, StoreClient};
pub use home::{MoveDirection, MoveOutcome};
