//! # Campgrounds
//!
//! This crate manages campground listings for the Campsite Bookings
//! application: creation, lookup, updates, deletion, and the owner-facing
//! listing with booking statistics. The reservation engine in the `bookings`
//! crate only ever reads campground summaries through its directory trait.

/// Types for campground operations
mod types;
pub use types::*;

/// Service for handling campground database operations
mod service;
pub use service::*;
