//! Userlink - Client-side user profile synchronization
//!
//! Coordinates optimistic profile updates: JSON-patch diffing, authenticated
//! PATCH requests, cache rollback on failure, and user notifications.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod patch;
pub mod session;

pub use error::{UserlinkError, UserlinkResult};
