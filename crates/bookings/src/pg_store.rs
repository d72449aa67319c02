use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::interval::StayInterval;
use crate::store::{BookingStore, CampgroundDirectory, NewBooking};
use crate::types::{
    Booking, BookingError, BookingWithCampground, BookingWithGuest, CampgroundSummary,
};

/// PostgreSQL-backed booking store.
///
/// The conflict check and the insert run as a single conditional statement,
/// and the schema carries an exclusion constraint on confirmed intervals, so
/// two racing requests can never both commit overlapping bookings.
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    /// Creates a new instance of `PgBookingStore` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps driver-level failures onto the booking error taxonomy.
///
/// A violated `bookings_no_overlap` exclusion constraint (SQLSTATE 23P01) is
/// the expected outcome of losing a race, not an infrastructure failure, and
/// surfaces as `DatesUnavailable`. Connection-level failures surface as
/// `StoreUnavailable` so the service may retry them.
fn map_store_error(err: sqlx::Error) -> BookingError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23P01") => {
            BookingError::DatesUnavailable
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            BookingError::StoreUnavailable
        }
        _ => BookingError::Database(err),
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking, BookingError> {
    Ok(Booking {
        id: row.get("id"),
        user_id: row.get("user_id"),
        campground_id: row.get("campground_id"),
        check_in_date: row.get("check_in_date"),
        check_out_date: row.get("check_out_date"),
        nights: row.get("nights"),
        total_price: row.get("total_price"),
        status: row
            .get::<String, _>("status")
            .parse()
            .map_err(BookingError::Validation)?,
        cancellation_reason: row.get("cancellation_reason"),
        created_at: row.get("created_at"),
        cancelled_at: row.get("cancelled_at"),
    })
}

const BOOKING_COLUMNS: &str = "id, user_id, campground_id, check_in_date, check_out_date, \
     nights, total_price, status, cancellation_reason, created_at, cancelled_at";

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find_confirmed_overlapping(
        &self,
        campground_id: Uuid,
        interval: StayInterval,
    ) -> Result<Vec<Booking>, BookingError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE campground_id = $1
              AND status = 'confirmed'
              AND check_in_date < $3
              AND check_out_date > $2
            "#,
        ))
        .bind(campground_id)
        .bind(interval.check_in)
        .bind(interval.check_out)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn insert_if_no_conflict(&self, new: NewBooking) -> Result<Booking, BookingError> {
        // Single statement: the insert only lands if no confirmed overlapping
        // row exists at commit time. The exclusion constraint in the schema
        // backstops the rare case of two of these racing each other.
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO bookings (
                id, user_id, campground_id, check_in_date, check_out_date,
                nights, total_price, status
            )
            SELECT $1, $2, $3, $4, $5, $6, $7, 'confirmed'
            WHERE NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE campground_id = $3
                  AND status = 'confirmed'
                  AND check_in_date < $5
                  AND check_out_date > $4
            )
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(new.id)
        .bind(new.user_id)
        .bind(new.campground_id)
        .bind(new.interval.check_in)
        .bind(new.interval.check_out)
        .bind(new.nights)
        .bind(new.total_price)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        match row {
            Some(row) => booking_from_row(&row),
            None => Err(BookingError::DatesUnavailable),
        }
    }

    async fn get(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn mark_cancelled(
        &self,
        booking_id: Uuid,
        reason: &str,
    ) -> Result<Option<Booking>, BookingError> {
        // The status predicate makes the transition atomic with the re-check;
        // a concurrent cancel loses by matching zero rows.
        let row = sqlx::query(&format!(
            r#"
            UPDATE bookings
            SET status = 'cancelled', cancellation_reason = $2, cancelled_at = NOW()
            WHERE id = $1 AND status = 'confirmed'
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(booking_id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingWithCampground>, BookingError> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.id, b.campground_id, b.check_in_date, b.check_out_date,
                b.nights, b.total_price, b.status, b.cancellation_reason,
                b.created_at, b.cancelled_at, c.title AS campground_title
            FROM bookings b
            LEFT JOIN campgrounds c ON b.campground_id = c.id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(BookingWithCampground {
                    id: row.get("id"),
                    campground_id: row.get("campground_id"),
                    campground_title: row
                        .get::<Option<String>, _>("campground_title")
                        .unwrap_or_else(|| "Unknown Campground".to_string()),
                    check_in_date: row.get("check_in_date"),
                    check_out_date: row.get("check_out_date"),
                    nights: row.get("nights"),
                    total_price: row.get("total_price"),
                    status: row
                        .get::<String, _>("status")
                        .parse()
                        .map_err(BookingError::Validation)?,
                    cancellation_reason: row.get("cancellation_reason"),
                    created_at: row.get("created_at"),
                    cancelled_at: row.get("cancelled_at"),
                })
            })
            .collect()
    }

    async fn list_by_campground(
        &self,
        campground_id: Uuid,
    ) -> Result<Vec<BookingWithGuest>, BookingError> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.id, b.user_id, b.check_in_date, b.check_out_date,
                b.nights, b.total_price, b.status, b.cancellation_reason,
                b.created_at, b.cancelled_at,
                u.name AS guest_name, u.email AS guest_email
            FROM bookings b
            LEFT JOIN users u ON b.user_id = u.id
            WHERE b.campground_id = $1
            ORDER BY b.check_in_date ASC
            "#,
        )
        .bind(campground_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(BookingWithGuest {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    guest_name: row
                        .get::<Option<String>, _>("guest_name")
                        .unwrap_or_else(|| "Deleted User".to_string()),
                    guest_email: row
                        .get::<Option<String>, _>("guest_email")
                        .unwrap_or_default(),
                    check_in_date: row.get("check_in_date"),
                    check_out_date: row.get("check_out_date"),
                    nights: row.get("nights"),
                    total_price: row.get("total_price"),
                    status: row
                        .get::<String, _>("status")
                        .parse()
                        .map_err(BookingError::Validation)?,
                    cancellation_reason: row.get("cancellation_reason"),
                    created_at: row.get("created_at"),
                    cancelled_at: row.get("cancelled_at"),
                })
            })
            .collect()
    }
}

/// Campground lookup backed by the campgrounds table. Read-only; the
/// campground lifecycle belongs to the `campgrounds` crate.
pub struct PgCampgroundDirectory {
    pool: PgPool,
}

impl PgCampgroundDirectory {
    /// Creates a new instance of `PgCampgroundDirectory` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampgroundDirectory for PgCampgroundDirectory {
    async fn get_summary(
        &self,
        campground_id: Uuid,
    ) -> Result<Option<CampgroundSummary>, BookingError> {
        let row = sqlx::query("SELECT id, nightly_rate, owner_id FROM campgrounds WHERE id = $1")
            .bind(campground_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(row.map(|row| CampgroundSummary {
            id: row.get("id"),
            nightly_rate: row.get("nightly_rate"),
            owner_id: row.get("owner_id"),
        }))
    }
}
