use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::warn;
use sqlx::PgPool;
use tokio::time::{sleep, timeout};
use uuid::Uuid;

use crate::interval::StayInterval;
use crate::pg_store::{PgBookingStore, PgCampgroundDirectory};
use crate::policy::{Actor, can_cancel, can_view_campground_bookings};
use crate::store::{BookingStore, CampgroundDirectory, NewBooking};
use crate::types::{
    Availability, Booking, BookingError, BookingStatus, BookingWithCampground, BookingWithGuest,
};

/// Reason recorded when a guest cancels without giving one.
const DEFAULT_CANCELLATION_REASON: &str = "Cancelled by user";

/// Tuning knobs for the booking service.
#[derive(Debug, Clone)]
pub struct BookingServiceConfig {
    /// Deadline for a single availability check or creation attempt
    /// (default: 10 seconds). Exceeding it surfaces as `Timeout`.
    pub operation_deadline: Duration,

    /// How many times a creation retries a transient store failure before
    /// surfacing it (default: 3).
    pub store_retry_attempts: u32,

    /// Initial backoff between retries, doubled each attempt
    /// (default: 100 milliseconds).
    pub store_retry_backoff: Duration,
}

impl Default for BookingServiceConfig {
    fn default() -> Self {
        Self {
            operation_deadline: Duration::from_secs(10),
            store_retry_attempts: 3,
            store_retry_backoff: Duration::from_millis(100),
        }
    }
}

/// Service orchestrating the reservation engine: validation, the race-free
/// conflict check, price computation, the cancellation state machine, and
/// the read-side listings.
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    campgrounds: Arc<dyn CampgroundDirectory>,
    config: BookingServiceConfig,
}

impl BookingService {
    /// Creates a service over the given store and campground directory.
    pub fn new(store: Arc<dyn BookingStore>, campgrounds: Arc<dyn CampgroundDirectory>) -> Self {
        Self::with_config(store, campgrounds, BookingServiceConfig::default())
    }

    /// Creates a service with explicit tuning.
    pub fn with_config(
        store: Arc<dyn BookingStore>,
        campgrounds: Arc<dyn CampgroundDirectory>,
        config: BookingServiceConfig,
    ) -> Self {
        Self {
            store,
            campgrounds,
            config,
        }
    }

    /// Creates a service backed by PostgreSQL with the provided connection pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgBookingStore::new(pool.clone())),
            Arc::new(PgCampgroundDirectory::new(pool)),
        )
    }

    /// Reports whether the requested dates are free on the campground.
    ///
    /// This read is advisory: it can go stale the instant it returns. The
    /// authoritative check happens inside `create_booking`.
    pub async fn check_availability(
        &self,
        campground_id: Uuid,
        interval: StayInterval,
    ) -> Result<Availability, BookingError> {
        timeout(self.config.operation_deadline, async {
            let conflicts = self
                .store
                .find_confirmed_overlapping(campground_id, interval)
                .await?;

            Ok(Availability {
                available: conflicts.is_empty(),
                conflicting_bookings: conflicts.len() as i64,
            })
        })
        .await
        .map_err(|_| BookingError::Timeout)?
    }

    /// Creates a confirmed booking for the user on the campground.
    ///
    /// Of any set of concurrently submitted overlapping requests for the same
    /// campground, at most one succeeds; the rest get `DatesUnavailable`. The
    /// guarantee comes from the store's atomic conditional insert, so it
    /// holds across independent worker processes, not just in this one.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        campground_id: Uuid,
        interval: StayInterval,
    ) -> Result<Booking, BookingError> {
        timeout(
            self.config.operation_deadline,
            self.create_booking_inner(user_id, campground_id, interval),
        )
        .await
        .map_err(|_| BookingError::Timeout)?
    }

    async fn create_booking_inner(
        &self,
        user_id: Uuid,
        campground_id: Uuid,
        interval: StayInterval,
    ) -> Result<Booking, BookingError> {
        if !interval.is_valid() {
            return Err(BookingError::InvalidDateRange);
        }

        if interval.check_in < Utc::now().date_naive() {
            return Err(BookingError::PastCheckIn);
        }

        let campground = self
            .campgrounds
            .get_summary(campground_id)
            .await?
            .ok_or(BookingError::CampgroundNotFound)?;

        let nights = interval.nights() as i32;
        let total_price = f64::from(nights) * campground.nightly_rate;

        let new = NewBooking {
            id: Uuid::new_v4(),
            user_id,
            campground_id,
            interval,
            nights,
            total_price,
        };

        self.insert_with_retry(new).await
    }

    /// Runs the atomic conditional insert, retrying transient store failures
    /// a bounded number of times. `DatesUnavailable` is the expected outcome
    /// of losing a race and is never retried.
    async fn insert_with_retry(&self, new: NewBooking) -> Result<Booking, BookingError> {
        let mut backoff = self.config.store_retry_backoff;
        let mut attempt = 1;

        loop {
            match self.store.insert_if_no_conflict(new.clone()).await {
                Err(BookingError::StoreUnavailable)
                    if attempt < self.config.store_retry_attempts =>
                {
                    warn!(
                        "Booking store unavailable (attempt {}/{}), retrying in {:?}",
                        attempt, self.config.store_retry_attempts, backoff
                    );
                    sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Cancels a booking on behalf of the actor.
    ///
    /// Guests may cancel their own bookings; campground owners and
    /// administrators may cancel any booking on their campground. When the
    /// guest gives no reason a generic one is recorded. Cancelling an
    /// already-cancelled booking reports `AlreadyCancelled` rather than
    /// silently succeeding.
    pub async fn cancel_booking(
        &self,
        actor: &Actor,
        booking_id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .store
            .get(booking_id)
            .await?
            .ok_or(BookingError::NotFound)?;

        let campground = self
            .campgrounds
            .get_summary(booking.campground_id)
            .await?
            .ok_or(BookingError::CampgroundNotFound)?;

        if !can_cancel(actor, booking.user_id, campground.owner_id) {
            return Err(BookingError::Forbidden);
        }

        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::AlreadyCancelled);
        }

        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string());

        // The store re-checks the status atomically with the update; a
        // concurrent cancel that lost the race surfaces here.
        self.store
            .mark_cancelled(booking_id, &reason)
            .await?
            .ok_or(BookingError::AlreadyCancelled)
    }

    /// All bookings made by the user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingWithCampground>, BookingError> {
        self.store.list_by_user(user_id).await
    }

    /// All bookings on the campground ordered by ascending check-in date.
    /// Only the campground owner and administrators may see them.
    pub async fn list_for_campground(
        &self,
        actor: &Actor,
        campground_id: Uuid,
    ) -> Result<Vec<BookingWithGuest>, BookingError> {
        let campground = self
            .campgrounds
            .get_summary(campground_id)
            .await?
            .ok_or(BookingError::CampgroundNotFound)?;

        if !can_view_campground_bookings(actor, campground.owner_id) {
            return Err(BookingError::Forbidden);
        }

        self.store.list_by_campground(campground_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::{InMemoryBookingStore, InMemoryCampgroundDirectory, in_memory_stores};
    use crate::types::CampgroundSummary;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use tokio::sync::Mutex;

    fn future_date(days_from_now: i64) -> NaiveDate {
        Utc::now().date_naive() + ChronoDuration::days(days_from_now)
    }

    fn stay(from: i64, to: i64) -> StayInterval {
        StayInterval::new(future_date(from), future_date(to))
    }

    async fn service_with_campground(
        nightly_rate: f64,
    ) -> (Arc<BookingService>, Uuid, Uuid, Arc<InMemoryBookingStore>) {
        let (store, directory) = in_memory_stores();
        let campground_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        directory
            .insert(CampgroundSummary {
                id: campground_id,
                nightly_rate,
                owner_id,
            })
            .await;

        let service = Arc::new(BookingService::new(store.clone(), directory));

        (service, campground_id, owner_id, store)
    }

    #[tokio::test]
    async fn test_booking_scenario_with_pricing_and_conflicts() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();

        // Three nights at 20 per night.
        let first = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();
        assert_eq!(first.nights, 3);
        assert_eq!(first.total_price, 60.0);
        assert_eq!(first.status, BookingStatus::Confirmed);

        // Overlapping request loses.
        let overlapping = service
            .create_booking(Uuid::new_v4(), campground_id, stay(32, 34))
            .await;
        assert!(matches!(overlapping, Err(BookingError::DatesUnavailable)));

        // Back-to-back turnover on the checkout day is allowed.
        let back_to_back = service
            .create_booking(Uuid::new_v4(), campground_id, stay(33, 35))
            .await
            .unwrap();
        assert_eq!(back_to_back.nights, 2);
        assert_eq!(back_to_back.total_price, 40.0);
    }

    #[tokio::test]
    async fn test_derived_fields_reproduce_from_persisted_booking() {
        let (service, campground_id, _, store) = service_with_campground(35.5).await;

        let booking = service
            .create_booking(Uuid::new_v4(), campground_id, stay(10, 14))
            .await
            .unwrap();

        let persisted = store.get(booking.id).await.unwrap().unwrap();
        assert_eq!(
            i64::from(persisted.nights),
            persisted.interval().nights(),
        );
        assert_eq!(
            persisted.total_price,
            f64::from(persisted.nights) * 35.5,
        );
    }

    #[tokio::test]
    async fn test_equal_dates_are_an_invalid_range() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;

        let result = service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 30))
            .await;

        assert!(matches!(result, Err(BookingError::InvalidDateRange)));
    }

    #[tokio::test]
    async fn test_reversed_dates_are_an_invalid_range() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;

        let result = service
            .create_booking(Uuid::new_v4(), campground_id, stay(33, 30))
            .await;

        assert!(matches!(result, Err(BookingError::InvalidDateRange)));
    }

    #[tokio::test]
    async fn test_past_check_in_is_rejected() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;

        let result = service
            .create_booking(Uuid::new_v4(), campground_id, stay(-2, 3))
            .await;

        assert!(matches!(result, Err(BookingError::PastCheckIn)));
    }

    #[tokio::test]
    async fn test_unknown_campground_is_rejected() {
        let (store, directory) = in_memory_stores();
        let service = BookingService::new(store, directory);

        let result = service
            .create_booking(Uuid::new_v4(), Uuid::new_v4(), stay(30, 33))
            .await;

        assert!(matches!(result, Err(BookingError::CampgroundNotFound)));
    }

    #[tokio::test]
    async fn test_free_campground_books_at_zero() {
        let (service, campground_id, _, _) = service_with_campground(0.0).await;

        let booking = service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 33))
            .await
            .unwrap();

        assert_eq!(booking.total_price, 0.0);
    }

    #[tokio::test]
    async fn test_concurrent_overlapping_requests_commit_exactly_once() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;
        let interval = stay(30, 33);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create_booking(Uuid::new_v4(), campground_id, interval)
                    .await
            }));
        }

        let mut successes = 0;
        let mut unavailable = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(BookingError::DatesUnavailable) => unavailable += 1,
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(unavailable, 7);
    }

    #[tokio::test]
    async fn test_availability_reflects_confirmed_bookings() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;

        let before = service
            .check_availability(campground_id, stay(30, 33))
            .await
            .unwrap();
        assert!(before.available);
        assert_eq!(before.conflicting_bookings, 0);

        service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 33))
            .await
            .unwrap();

        let after = service
            .check_availability(campground_id, stay(32, 34))
            .await
            .unwrap();
        assert!(!after.available);
        assert_eq!(after.conflicting_bookings, 1);

        let elsewhere = service
            .check_availability(campground_id, stay(40, 42))
            .await
            .unwrap();
        assert!(elsewhere.available);
    }

    #[tokio::test]
    async fn test_cancelled_booking_releases_its_dates() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();

        let booking = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();

        let actor = Actor {
            id: guest,
            is_admin: false,
        };
        service
            .cancel_booking(&actor, booking.id, None)
            .await
            .unwrap();

        // The same dates can be booked again once the cancellation committed.
        service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 33))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_guest_cancels_own_booking_with_verbatim_reason() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();

        let booking = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();

        let actor = Actor {
            id: guest,
            is_admin: false,
        };
        let cancelled = service
            .cancel_booking(&actor, booking.id, Some("Change of plans".to_string()))
            .await
            .unwrap();

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(
            cancelled.cancellation_reason.as_deref(),
            Some("Change of plans")
        );
        assert!(cancelled.cancelled_at.is_some());
    }

    #[tokio::test]
    async fn test_guest_cancel_without_reason_records_default() {
        let (service, campground_id, _, _) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();

        let booking = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();

        let actor = Actor {
            id: guest,
            is_admin: false,
        };
        let cancelled = service
            .cancel_booking(&actor, booking.id, None)
            .await
            .unwrap();

        assert_eq!(
            cancelled.cancellation_reason.as_deref(),
            Some("Cancelled by user")
        );
    }

    #[tokio::test]
    async fn test_owner_and_admin_can_cancel_guest_booking() {
        let (service, campground_id, owner_id, _) = service_with_campground(20.0).await;

        let booking = service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 33))
            .await
            .unwrap();

        let owner = Actor {
            id: owner_id,
            is_admin: false,
        };
        let cancelled = service
            .cancel_booking(&owner, booking.id, Some("Site flooded".to_string()))
            .await
            .unwrap();
        assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Site flooded"));

        let second = service
            .create_booking(Uuid::new_v4(), campground_id, stay(40, 42))
            .await
            .unwrap();

        let admin = Actor {
            id: Uuid::new_v4(),
            is_admin: true,
        };
        service
            .cancel_booking(&admin, second.id, Some("Policy violation".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_stranger_cannot_cancel_and_booking_is_unchanged() {
        let (service, campground_id, _, store) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();

        let booking = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();

        let stranger = Actor {
            id: Uuid::new_v4(),
            is_admin: false,
        };
        let result = service
            .cancel_booking(&stranger, booking.id, Some("Mine now".to_string()))
            .await;
        assert!(matches!(result, Err(BookingError::Forbidden)));

        let untouched = store.get(booking.id).await.unwrap().unwrap();
        assert_eq!(untouched.status, BookingStatus::Confirmed);
        assert!(untouched.cancellation_reason.is_none());
        assert!(untouched.cancelled_at.is_none());
    }

    #[tokio::test]
    async fn test_double_cancel_fails_and_keeps_first_timestamp() {
        let (service, campground_id, _, store) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();

        let booking = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();

        let actor = Actor {
            id: guest,
            is_admin: false,
        };
        service
            .cancel_booking(&actor, booking.id, Some("First".to_string()))
            .await
            .unwrap();

        let first_cancelled_at = store
            .get(booking.id)
            .await
            .unwrap()
            .unwrap()
            .cancelled_at;

        let again = service
            .cancel_booking(&actor, booking.id, Some("Second".to_string()))
            .await;
        assert!(matches!(again, Err(BookingError::AlreadyCancelled)));

        let after = store.get(booking.id).await.unwrap().unwrap();
        assert_eq!(after.cancelled_at, first_cancelled_at);
        assert_eq!(after.cancellation_reason.as_deref(), Some("First"));
    }

    #[tokio::test]
    async fn test_cancel_missing_booking_is_not_found() {
        let (service, _, _, _) = service_with_campground(20.0).await;

        let actor = Actor {
            id: Uuid::new_v4(),
            is_admin: false,
        };
        let result = service.cancel_booking(&actor, Uuid::new_v4(), None).await;

        assert!(matches!(result, Err(BookingError::NotFound)));
    }

    #[tokio::test]
    async fn test_user_listing_is_newest_first() {
        let (service, campground_id, _, store) = service_with_campground(20.0).await;
        store.register_campground(campground_id, "Lakeside Pines").await;
        let guest = Uuid::new_v4();

        let first = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();
        let second = service
            .create_booking(guest, campground_id, stay(40, 42))
            .await
            .unwrap();

        let listed = service.list_for_user(guest).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(listed[0].campground_title, "Lakeside Pines");
    }

    #[tokio::test]
    async fn test_campground_listing_is_owner_only_and_check_in_ordered() {
        let (service, campground_id, owner_id, store) = service_with_campground(20.0).await;
        let guest = Uuid::new_v4();
        store.register_guest(guest, "Sam Camper", "sam@example.com").await;

        // Created out of check-in order on purpose.
        let later = service
            .create_booking(guest, campground_id, stay(40, 42))
            .await
            .unwrap();
        let earlier = service
            .create_booking(guest, campground_id, stay(30, 33))
            .await
            .unwrap();

        let owner = Actor {
            id: owner_id,
            is_admin: false,
        };
        let listed = service
            .list_for_campground(&owner, campground_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, earlier.id);
        assert_eq!(listed[1].id, later.id);
        assert_eq!(listed[0].guest_name, "Sam Camper");

        let stranger = Actor {
            id: Uuid::new_v4(),
            is_admin: false,
        };
        let denied = service.list_for_campground(&stranger, campground_id).await;
        assert!(matches!(denied, Err(BookingError::Forbidden)));
    }

    /// Store wrapper that fails a configured number of inserts with a
    /// transient error before delegating to the in-memory store.
    struct FlakyStore {
        inner: Arc<InMemoryBookingStore>,
        failures_left: Mutex<u32>,
    }

    #[async_trait]
    impl BookingStore for FlakyStore {
        async fn find_confirmed_overlapping(
            &self,
            campground_id: Uuid,
            interval: StayInterval,
        ) -> Result<Vec<Booking>, BookingError> {
            self.inner
                .find_confirmed_overlapping(campground_id, interval)
                .await
        }

        async fn insert_if_no_conflict(&self, new: NewBooking) -> Result<Booking, BookingError> {
            let mut failures = self.failures_left.lock().await;
            if *failures > 0 {
                *failures -= 1;
                return Err(BookingError::StoreUnavailable);
            }
            drop(failures);

            self.inner.insert_if_no_conflict(new).await
        }

        async fn get(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
            self.inner.get(booking_id).await
        }

        async fn mark_cancelled(
            &self,
            booking_id: Uuid,
            reason: &str,
        ) -> Result<Option<Booking>, BookingError> {
            self.inner.mark_cancelled(booking_id, reason).await
        }

        async fn list_by_user(
            &self,
            user_id: Uuid,
        ) -> Result<Vec<BookingWithCampground>, BookingError> {
            self.inner.list_by_user(user_id).await
        }

        async fn list_by_campground(
            &self,
            campground_id: Uuid,
        ) -> Result<Vec<BookingWithGuest>, BookingError> {
            self.inner.list_by_campground(campground_id).await
        }
    }

    #[tokio::test]
    async fn test_transient_store_failures_are_retried() {
        let directory = Arc::new(InMemoryCampgroundDirectory::new());
        let campground_id = Uuid::new_v4();
        directory
            .insert(CampgroundSummary {
                id: campground_id,
                nightly_rate: 20.0,
                owner_id: Uuid::new_v4(),
            })
            .await;

        let flaky = Arc::new(FlakyStore {
            inner: Arc::new(InMemoryBookingStore::new()),
            failures_left: Mutex::new(2),
        });

        let config = BookingServiceConfig {
            store_retry_backoff: Duration::from_millis(1),
            ..BookingServiceConfig::default()
        };
        let service = BookingService::with_config(flaky, directory, config);

        // Two transient failures, then success on the third attempt.
        let booking = service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 33))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_persistent_store_failure_surfaces_after_retries() {
        let directory = Arc::new(InMemoryCampgroundDirectory::new());
        let campground_id = Uuid::new_v4();
        directory
            .insert(CampgroundSummary {
                id: campground_id,
                nightly_rate: 20.0,
                owner_id: Uuid::new_v4(),
            })
            .await;

        let flaky = Arc::new(FlakyStore {
            inner: Arc::new(InMemoryBookingStore::new()),
            failures_left: Mutex::new(u32::MAX),
        });

        let config = BookingServiceConfig {
            store_retry_backoff: Duration::from_millis(1),
            ..BookingServiceConfig::default()
        };
        let service = BookingService::with_config(flaky, directory, config);

        let result = service
            .create_booking(Uuid::new_v4(), campground_id, stay(30, 33))
            .await;
        assert!(matches!(result, Err(BookingError::StoreUnavailable)));
    }

    /// Directory that never answers within a test-sized deadline.
    struct StalledDirectory;

    #[async_trait]
    impl CampgroundDirectory for StalledDirectory {
        async fn get_summary(
            &self,
            _campground_id: Uuid,
        ) -> Result<Option<crate::types::CampgroundSummary>, BookingError> {
            sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_creation_exceeding_deadline_times_out_without_partial_write() {
        let store = Arc::new(InMemoryBookingStore::new());
        let config = BookingServiceConfig {
            operation_deadline: Duration::from_millis(20),
            ..BookingServiceConfig::default()
        };
        let service = BookingService::with_config(
            store.clone(),
            Arc::new(StalledDirectory),
            config,
        );

        let guest = Uuid::new_v4();
        let result = service
            .create_booking(guest, Uuid::new_v4(), stay(30, 33))
            .await;
        assert!(matches!(result, Err(BookingError::Timeout)));

        // Nothing was persisted by the timed-out attempt.
        assert!(store.list_by_user(guest).await.unwrap().is_empty());
    }
}
