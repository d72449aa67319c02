//! # Web Handlers
//!
//! HTTP handlers for the Campsite Bookings API: booking creation and
//! cancellation, availability checks, booking listings, campground CRUD,
//! and account endpoints. Handlers translate between the wire format and
//! the services; all domain rules live in the service crates.

/// Wire types for the booking endpoints
mod booking_types;
pub use booking_types::*;

/// Handlers for booking operations
mod booking_handlers;
pub use booking_handlers::*;

/// Handlers for campground listings
mod campground_handlers;
pub use campground_handlers::*;

/// Handlers for signup, login, and profile
mod auth_handlers;
pub use auth_handlers::*;

use auth_services::middleware::CurrentActor;
use bookings::policy::Actor;

/// Converts the middleware's actor facts into the policy actor the
/// services consume.
pub(crate) fn to_actor(current: &CurrentActor) -> Actor {
    Actor {
        id: current.id,
        is_admin: current.is_admin,
    }
}
