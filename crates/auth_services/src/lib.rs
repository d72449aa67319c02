//! # Auth Services
//!
//! Identity provider for the Campsite Bookings application: user accounts,
//! credential verification, JWT issuance, and the request middleware that
//! establishes the acting user and role for the rest of the system.

/// Types for authentication and user accounts
pub mod types;
pub use types::*;

/// Service for user account database operations
pub mod service;
pub use service::*;

/// JWT token issuance and verification
pub mod jwt;
pub use jwt::*;

/// Request middleware and the authenticated-actor extractor
pub mod middleware;
pub use middleware::*;
