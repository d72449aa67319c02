use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A campground listing as stored in the database.
#[derive(Debug, Clone, Serialize)]
pub struct Campground {
    /// Unique identifier for the campground.
    pub id: Uuid,
    /// Display title of the listing.
    pub title: String,
    /// Human-readable location.
    pub location: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the campground is free or paid.
    pub price_type: String,
    /// Price per night; zero for a free campground.
    pub nightly_rate: f64,
    /// Latitude of the site.
    pub latitude: f64,
    /// Longitude of the site.
    pub longitude: f64,
    /// User who listed the campground.
    pub owner_id: Uuid,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

/// A campground with its confirmed-booking count, for the owner dashboard.
///
/// The count is derived by query against the bookings table each time; there
/// is no maintained list of booking ids on the campground to drift out of
/// sync with the booking store.
#[derive(Debug, Clone, Serialize)]
pub struct CampgroundWithStats {
    /// The campground listing.
    #[serde(flatten)]
    pub campground: Campground,
    /// Number of confirmed bookings on the campground.
    pub total_bookings: i64,
}

/// Request structure for creating a campground listing
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampgroundRequest {
    /// Display title of the listing
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    /// Human-readable location
    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    /// Free-form description
    pub description: Option<String>,

    /// Whether the campground is free or paid
    #[validate(custom(function = "validate_price_type"))]
    pub price_type: String,

    /// Price per night, required when the campground is paid
    pub price_amount: Option<f64>,

    /// Latitude of the site
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    /// Longitude of the site
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

/// Request structure for updating a campground listing
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCampgroundRequest {
    /// Display title of the listing
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    /// Human-readable location
    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    /// Free-form description
    pub description: Option<String>,

    /// Whether the campground is free or paid
    #[validate(custom(function = "validate_price_type"))]
    pub price_type: String,

    /// Price per night, required when the campground is paid
    pub price_amount: Option<f64>,

    /// Latitude of the site
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    /// Longitude of the site
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

/// Response structure for listing campgrounds
#[derive(Debug, Serialize)]
pub struct ListCampgroundsResponse {
    /// The campground listings
    pub campgrounds: Vec<Campground>,
    /// Total count of listings
    pub total: i64,
}

/// Response structure for the owner dashboard listing
#[derive(Debug, Serialize)]
pub struct MyCampgroundsResponse {
    /// The owner's campgrounds with booking statistics
    pub campgrounds: Vec<CampgroundWithStats>,
    /// Total count of listings
    pub total: i64,
}

/// Custom error type for campground operations
#[derive(Debug, thiserror::Error)]
pub enum CampgroundError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Campground not found
    #[error("Campground not found")]
    NotFound,

    /// Actor is not allowed to manage this campground
    #[error("You do not have permission to manage this campground")]
    Forbidden,
}

impl actix_web::ResponseError for CampgroundError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            CampgroundError::Validation(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "validation_error",
                    "message": msg
                }))
            }
            CampgroundError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "campground_not_found",
                "message": "Cannot find that campground"
            })),
            CampgroundError::Forbidden => HttpResponse::Forbidden().json(serde_json::json!({
                "error": "forbidden",
                "message": "You do not have permission to do that"
            })),
            CampgroundError::Database(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

/// Custom validation function for the price type
fn validate_price_type(price_type: &str) -> Result<(), validator::ValidationError> {
    match price_type {
        "free" | "paid" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_price_type")),
    }
}

/// Resolves the nightly rate from the price type and amount: free listings
/// always cost zero, paid listings need a rate of at least $0.01.
pub fn resolve_nightly_rate(
    price_type: &str,
    price_amount: Option<f64>,
) -> Result<f64, CampgroundError> {
    match price_type {
        "free" => Ok(0.0),
        _ => match price_amount {
            Some(amount) if amount >= 0.01 => Ok(amount),
            _ => Err(CampgroundError::Validation(
                "Price must be at least $0.01 when paid option is selected".to_string(),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_listing_always_costs_zero() {
        assert_eq!(resolve_nightly_rate("free", None).unwrap(), 0.0);
        // A stray amount on a free listing is ignored.
        assert_eq!(resolve_nightly_rate("free", Some(25.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_paid_listing_requires_a_rate() {
        assert_eq!(resolve_nightly_rate("paid", Some(25.0)).unwrap(), 25.0);
        assert!(resolve_nightly_rate("paid", None).is_err());
        assert!(resolve_nightly_rate("paid", Some(0.0)).is_err());
    }

    #[test]
    fn test_price_type_validation() {
        assert!(validate_price_type("free").is_ok());
        assert!(validate_price_type("paid").is_ok());
        assert!(validate_price_type("donation").is_err());
    }
}
