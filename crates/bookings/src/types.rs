use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::StayInterval;

/// Lifecycle status of a booking.
///
/// Bookings start out confirmed and may transition to cancelled exactly once.
/// There is no other state and no way back; cancelled rows are kept as an
/// audit trail rather than deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// The booking actively holds its interval against conflicting requests.
    Confirmed,
    /// Terminal state; the interval is released for rebooking.
    Cancelled,
}

impl BookingStatus {
    /// Database representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// A campsite booking as stored in the database.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// Guest who made the booking.
    pub user_id: Uuid,
    /// Campground being reserved.
    pub campground_id: Uuid,
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Day the site is vacated.
    pub check_out_date: NaiveDate,
    /// Number of nights, always derived from the dates.
    pub nights: i32,
    /// Price frozen at creation time; later rate changes do not apply.
    pub total_price: f64,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Reason recorded on cancellation, null while confirmed.
    pub cancellation_reason: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was cancelled, null while confirmed.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// The booked stay as a half-open interval.
    pub fn interval(&self) -> StayInterval {
        StayInterval::new(self.check_in_date, self.check_out_date)
    }
}

/// A booking joined with its campground, for the guest-facing listing.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithCampground {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// Campground being reserved.
    pub campground_id: Uuid,
    /// Title of the campground, or a placeholder if the listing is gone.
    pub campground_title: String,
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Day the site is vacated.
    pub check_out_date: NaiveDate,
    /// Number of nights.
    pub nights: i32,
    /// Price frozen at creation time.
    pub total_price: f64,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Reason recorded on cancellation.
    pub cancellation_reason: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A booking joined with its guest, for the owner-facing listing.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithGuest {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// Guest who made the booking.
    pub user_id: Uuid,
    /// Name of the guest, or a placeholder if the account is gone.
    pub guest_name: String,
    /// Email of the guest.
    pub guest_email: String,
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Day the site is vacated.
    pub check_out_date: NaiveDate,
    /// Number of nights.
    pub nights: i32,
    /// Price frozen at creation time.
    pub total_price: f64,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Reason recorded on cancellation.
    pub cancellation_reason: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Result of an availability check.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Availability {
    /// Whether the requested dates are free of conflicts.
    pub available: bool,
    /// How many confirmed bookings overlap the requested dates.
    pub conflicting_bookings: i64,
}

/// The campground fields the reservation engine reads. The campground
/// lifecycle itself is owned by the `campgrounds` crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampgroundSummary {
    /// Unique identifier for the campground.
    pub id: Uuid,
    /// Price per night; zero for a free campground.
    pub nightly_rate: f64,
    /// User who listed the campground.
    pub owner_id: Uuid,
}

/// Custom error type for booking operations
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Booking not found
    #[error("Booking not found")]
    NotFound,

    /// Campground not found
    #[error("Campground not found")]
    CampgroundNotFound,

    /// Check-out date is not after check-in date
    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    /// Check-in date is in the past
    #[error("Check-in date cannot be in the past")]
    PastCheckIn,

    /// Another confirmed booking holds the requested dates
    #[error("These dates are not available")]
    DatesUnavailable,

    /// Actor is not allowed to perform the operation
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// The booking was already cancelled
    #[error("This booking is already cancelled")]
    AlreadyCancelled,

    /// The operation exceeded its deadline
    #[error("The operation timed out")]
    Timeout,

    /// Transient store failure, safe to retry
    #[error("The booking store is temporarily unavailable")]
    StoreUnavailable,
}

impl actix_web::ResponseError for BookingError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            BookingError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            BookingError::InvalidDateRange => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_date_range",
                "message": "Check-out date must be after check-in date"
            })),
            BookingError::PastCheckIn => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "past_check_in",
                "message": "Check-in date cannot be in the past"
            })),
            BookingError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "booking_not_found",
                "message": "Booking not found"
            })),
            BookingError::CampgroundNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "campground_not_found",
                "message": "Campground not found"
            })),
            BookingError::DatesUnavailable => HttpResponse::Conflict().json(serde_json::json!({
                "error": "dates_unavailable",
                "message": "These dates are not available. Please choose different dates."
            })),
            BookingError::AlreadyCancelled => HttpResponse::Conflict().json(serde_json::json!({
                "error": "already_cancelled",
                "message": "This booking is already cancelled"
            })),
            BookingError::Forbidden => HttpResponse::Forbidden().json(serde_json::json!({
                "error": "forbidden",
                "message": "You do not have permission to perform this action"
            })),
            BookingError::Timeout => HttpResponse::GatewayTimeout().json(serde_json::json!({
                "error": "timeout",
                "message": "The operation timed out"
            })),
            BookingError::StoreUnavailable => {
                HttpResponse::ServiceUnavailable().json(serde_json::json!({
                    "error": "store_unavailable",
                    "message": "The booking store is temporarily unavailable"
                }))
            }
            BookingError::Database(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}
