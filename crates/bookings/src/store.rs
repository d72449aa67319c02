use async_trait::async_trait;
use uuid::Uuid;

use crate::interval::StayInterval;
use crate::types::{
    Booking, BookingError, BookingWithCampground, BookingWithGuest, CampgroundSummary,
};

/// Payload for inserting a confirmed booking. All derived fields are computed
/// by the service before the insert; the store only enforces the no-overlap
/// invariant.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Identifier assigned by the service.
    pub id: Uuid,
    /// Guest making the booking.
    pub user_id: Uuid,
    /// Campground being reserved.
    pub campground_id: Uuid,
    /// Requested stay.
    pub interval: StayInterval,
    /// Number of nights derived from the interval.
    pub nights: i32,
    /// Price frozen at creation time.
    pub total_price: f64,
}

/// Persistence seam for bookings.
///
/// The store is the single source of truth: the no-overlap invariant and the
/// single-cancellation invariant are enforced here, not in handler memory,
/// since request handlers run as independent workers.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All confirmed bookings for the campground whose intervals overlap the
    /// candidate. Advisory; the authoritative check is `insert_if_no_conflict`.
    async fn find_confirmed_overlapping(
        &self,
        campground_id: Uuid,
        interval: StayInterval,
    ) -> Result<Vec<Booking>, BookingError>;

    /// Inserts a confirmed booking if and only if no confirmed booking on the
    /// same campground overlaps it, as one atomic step. A losing concurrent
    /// request gets `DatesUnavailable` and never a partial record.
    async fn insert_if_no_conflict(&self, new: NewBooking) -> Result<Booking, BookingError>;

    /// Looks a booking up by id.
    async fn get(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError>;

    /// Transitions a booking from confirmed to cancelled, recording the
    /// reason and cancellation time. The status re-check is atomic with the
    /// mutation; `None` means the booking was no longer confirmed.
    async fn mark_cancelled(
        &self,
        booking_id: Uuid,
        reason: &str,
    ) -> Result<Option<Booking>, BookingError>;

    /// All bookings made by the user, newest first, joined with campground
    /// summaries for display.
    async fn list_by_user(&self, user_id: Uuid)
    -> Result<Vec<BookingWithCampground>, BookingError>;

    /// All bookings on the campground ordered by ascending check-in date,
    /// joined with guest details for the owner's report.
    async fn list_by_campground(
        &self,
        campground_id: Uuid,
    ) -> Result<Vec<BookingWithGuest>, BookingError>;
}

/// Read-only lookup into the campground collaborator. The engine only ever
/// reads the summary fields; it does not own the campground lifecycle.
#[async_trait]
pub trait CampgroundDirectory: Send + Sync {
    /// Resolves a campground id to its summary, or `None` if it is gone.
    async fn get_summary(
        &self,
        campground_id: Uuid,
    ) -> Result<Option<CampgroundSummary>, BookingError>;
}
