#![warn(clippy::all, missing_docs)]

//! Core domain logic for the listings site.
//!
//! This crate hosts the listing model, the JSON-backed item store,
//! slug generation, admin sessions, and the catalog operations used by
//! the web frontend.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod models;
pub mod slug;
pub mod store;

pub use auth::{AdminSessions, AuthError};
pub use catalog::Catalog;
pub use config::AppConfig;
pub use contact::{ContactForm, MessageStore};
pub use error::{CatalogError, CatalogResult};
pub use models::{ContactMessage, Listing, ListingInput};
pub use store::ItemStore;
