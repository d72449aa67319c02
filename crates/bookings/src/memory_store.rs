use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::interval::StayInterval;
use crate::store::{BookingStore, CampgroundDirectory, NewBooking};
use crate::types::{
    Booking, BookingError, BookingStatus, BookingWithCampground, BookingWithGuest,
    CampgroundSummary,
};

#[derive(Default)]
struct MemoryState {
    bookings: HashMap<Uuid, Booking>,
    campground_titles: HashMap<Uuid, String>,
    guests: HashMap<Uuid, (String, String)>,
}

/// In-memory booking store.
///
/// Serializes every creation attempt through one mutex held across the
/// check-and-insert, which gives the same observable behavior as the
/// conditional insert in `PgBookingStore`: of any set of concurrent
/// overlapping requests at most one commits. Used by unit tests and useful
/// as a lightweight stand-in for the database.
#[derive(Default)]
pub struct InMemoryBookingStore {
    state: Mutex<MemoryState>,
}

impl InMemoryBookingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a campground title for the guest-facing listing join.
    pub async fn register_campground(&self, campground_id: Uuid, title: &str) {
        let mut state = self.state.lock().await;
        state
            .campground_titles
            .insert(campground_id, title.to_string());
    }

    /// Records guest details for the owner-facing listing join.
    pub async fn register_guest(&self, user_id: Uuid, name: &str, email: &str) {
        let mut state = self.state.lock().await;
        state
            .guests
            .insert(user_id, (name.to_string(), email.to_string()));
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn find_confirmed_overlapping(
        &self,
        campground_id: Uuid,
        interval: StayInterval,
    ) -> Result<Vec<Booking>, BookingError> {
        let state = self.state.lock().await;

        Ok(state
            .bookings
            .values()
            .filter(|b| {
                b.campground_id == campground_id
                    && b.status == BookingStatus::Confirmed
                    && b.interval().overlaps(&interval)
            })
            .cloned()
            .collect())
    }

    async fn insert_if_no_conflict(&self, new: NewBooking) -> Result<Booking, BookingError> {
        // The lock is held across check and insert; this is the critical
        // section that keeps concurrent overlapping requests from both
        // committing.
        let mut state = self.state.lock().await;

        let conflict = state.bookings.values().any(|b| {
            b.campground_id == new.campground_id
                && b.status == BookingStatus::Confirmed
                && b.interval().overlaps(&new.interval)
        });

        if conflict {
            return Err(BookingError::DatesUnavailable);
        }

        let booking = Booking {
            id: new.id,
            user_id: new.user_id,
            campground_id: new.campground_id,
            check_in_date: new.interval.check_in,
            check_out_date: new.interval.check_out,
            nights: new.nights,
            total_price: new.total_price,
            status: BookingStatus::Confirmed,
            cancellation_reason: None,
            created_at: Utc::now(),
            cancelled_at: None,
        };

        state.bookings.insert(booking.id, booking.clone());

        Ok(booking)
    }

    async fn get(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
        let state = self.state.lock().await;
        Ok(state.bookings.get(&booking_id).cloned())
    }

    async fn mark_cancelled(
        &self,
        booking_id: Uuid,
        reason: &str,
    ) -> Result<Option<Booking>, BookingError> {
        let mut state = self.state.lock().await;

        match state.bookings.get_mut(&booking_id) {
            Some(booking) if booking.status == BookingStatus::Confirmed => {
                booking.status = BookingStatus::Cancelled;
                booking.cancellation_reason = Some(reason.to_string());
                booking.cancelled_at = Some(Utc::now());
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingWithCampground>, BookingError> {
        let state = self.state.lock().await;

        let mut bookings: Vec<BookingWithCampground> = state
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .map(|b| BookingWithCampground {
                id: b.id,
                campground_id: b.campground_id,
                campground_title: state
                    .campground_titles
                    .get(&b.campground_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown Campground".to_string()),
                check_in_date: b.check_in_date,
                check_out_date: b.check_out_date,
                nights: b.nights,
                total_price: b.total_price,
                status: b.status,
                cancellation_reason: b.cancellation_reason.clone(),
                created_at: b.created_at,
                cancelled_at: b.cancelled_at,
            })
            .collect();

        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(bookings)
    }

    async fn list_by_campground(
        &self,
        campground_id: Uuid,
    ) -> Result<Vec<BookingWithGuest>, BookingError> {
        let state = self.state.lock().await;

        let mut bookings: Vec<BookingWithGuest> = state
            .bookings
            .values()
            .filter(|b| b.campground_id == campground_id)
            .map(|b| {
                let (name, email) = state
                    .guests
                    .get(&b.user_id)
                    .cloned()
                    .unwrap_or_else(|| ("Deleted User".to_string(), String::new()));

                BookingWithGuest {
                    id: b.id,
                    user_id: b.user_id,
                    guest_name: name,
                    guest_email: email,
                    check_in_date: b.check_in_date,
                    check_out_date: b.check_out_date,
                    nights: b.nights,
                    total_price: b.total_price,
                    status: b.status,
                    cancellation_reason: b.cancellation_reason.clone(),
                    created_at: b.created_at,
                    cancelled_at: b.cancelled_at,
                }
            })
            .collect();

        bookings.sort_by(|a, b| a.check_in_date.cmp(&b.check_in_date));

        Ok(bookings)
    }
}

/// In-memory campground directory for tests and local runs.
#[derive(Default)]
pub struct InMemoryCampgroundDirectory {
    summaries: RwLock<HashMap<Uuid, CampgroundSummary>>,
}

impl InMemoryCampgroundDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a campground summary.
    pub async fn insert(&self, summary: CampgroundSummary) {
        let mut summaries = self.summaries.write().await;
        summaries.insert(summary.id, summary);
    }
}

#[async_trait]
impl CampgroundDirectory for InMemoryCampgroundDirectory {
    async fn get_summary(
        &self,
        campground_id: Uuid,
    ) -> Result<Option<CampgroundSummary>, BookingError> {
        let summaries = self.summaries.read().await;
        Ok(summaries.get(&campground_id).copied())
    }
}

/// Convenience pair of in-memory collaborators wired together for tests.
pub fn in_memory_stores() -> (Arc<InMemoryBookingStore>, Arc<InMemoryCampgroundDirectory>) {
    (
        Arc::new(InMemoryBookingStore::new()),
        Arc::new(InMemoryCampgroundDirectory::new()),
    )
}
