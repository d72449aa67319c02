use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bookings::{BookingStatus, BookingWithCampground, BookingWithGuest};

/// Request structure for checking availability on a campground
#[derive(Debug, Deserialize)]
pub struct CheckAvailabilityRequest {
    /// Campground to check
    pub campground_id: Uuid,
    /// First night of the requested stay
    pub check_in_date: NaiveDate,
    /// Day the site would be vacated
    pub check_out_date: NaiveDate,
}

/// Request structure for creating a booking
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Campground to reserve
    pub campground_id: Uuid,
    /// First night of the stay
    pub check_in_date: NaiveDate,
    /// Day the site is vacated
    pub check_out_date: NaiveDate,
}

/// Response structure for a created booking
#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    /// Unique identifier for the booking
    pub id: Uuid,
    /// Campground reserved
    pub campground_id: Uuid,
    /// First night of the stay
    pub check_in_date: NaiveDate,
    /// Day the site is vacated
    pub check_out_date: NaiveDate,
    /// Number of nights calculated from the dates
    pub nights: i32,
    /// Price frozen at creation time
    pub total_price: f64,
    /// Current status of the booking
    pub status: BookingStatus,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

/// Request structure for an owner or administrator cancelling a booking
#[derive(Debug, Deserialize, Validate)]
pub struct CancelBookingRequest {
    /// Reason recorded on the booking
    #[validate(length(min = 1, max = 500, message = "Cancellation reason is required"))]
    pub cancellation_reason: String,
}

/// Request structure for a guest cancelling their own booking
#[derive(Debug, Default, Deserialize)]
pub struct CancelOwnBookingRequest {
    /// Optional reason; a generic one is recorded when omitted
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

/// Response structure for the guest's booking listing
#[derive(Debug, Serialize)]
pub struct ListBookingsResponse {
    /// Bookings joined with campground summaries, newest first
    pub bookings: Vec<BookingWithCampground>,
    /// Total count of bookings
    pub total: i64,
}

/// Response structure for the owner's campground booking report
#[derive(Debug, Serialize)]
pub struct CampgroundBookingsResponse {
    /// Bookings joined with guest details, by ascending check-in date
    pub bookings: Vec<BookingWithGuest>,
    /// Total count of bookings
    pub total: i64,
}
