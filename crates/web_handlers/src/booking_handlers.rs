use actix_web::{HttpResponse, Result, web};
use validator::Validate;

use auth_services::middleware::AuthenticatedActor;
use bookings::{BookingError, BookingService, StayInterval};

use crate::booking_types::*;
use crate::to_actor;

/// Checks whether the requested dates are free on a campground.
///
/// The answer is advisory; creating the booking re-checks atomically.
pub async fn check_availability(
    pool: web::Data<sqlx::PgPool>,
    request: web::Json<CheckAvailabilityRequest>,
) -> Result<HttpResponse, BookingError> {
    let service = BookingService::from_pool(pool.get_ref().clone());
    let availability = service
        .check_availability(
            request.campground_id,
            StayInterval::new(request.check_in_date, request.check_out_date),
        )
        .await?;

    Ok(HttpResponse::Ok().json(availability))
}

/// Creates a booking for the authenticated guest.
pub async fn create_booking(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, BookingError> {
    let service = BookingService::from_pool(pool.get_ref().clone());
    let booking = service
        .create_booking(
            actor.0.id,
            request.campground_id,
            StayInterval::new(request.check_in_date, request.check_out_date),
        )
        .await?;

    let response = CreateBookingResponse {
        id: booking.id,
        campground_id: booking.campground_id,
        check_in_date: booking.check_in_date,
        check_out_date: booking.check_out_date,
        nights: booking.nights,
        total_price: booking.total_price,
        status: booking.status,
        created_at: booking.created_at,
    };

    Ok(HttpResponse::Created().json(response))
}

/// Lists the authenticated guest's bookings, newest first.
pub async fn my_bookings(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
) -> Result<HttpResponse, BookingError> {
    let service = BookingService::from_pool(pool.get_ref().clone());
    let bookings = service.list_for_user(actor.0.id).await?;

    let response = ListBookingsResponse {
        total: bookings.len() as i64,
        bookings,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Lists the bookings on a campground for its owner or an administrator,
/// ordered by ascending check-in date.
pub async fn campground_bookings(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, BookingError> {
    let campground_id = path.into_inner();
    let service = BookingService::from_pool(pool.get_ref().clone());
    let bookings = service
        .list_for_campground(&to_actor(&actor.0), campground_id)
        .await?;

    let response = CampgroundBookingsResponse {
        total: bookings.len() as i64,
        bookings,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Cancels a booking on behalf of the campground owner or an administrator.
/// A reason is required on this path.
pub async fn cancel_booking(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    path: web::Path<uuid::Uuid>,
    request: web::Json<CancelBookingRequest>,
) -> Result<HttpResponse, BookingError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| BookingError::Validation(format!("Validation error: {}", e)))?;

    let booking_id = path.into_inner();
    let service = BookingService::from_pool(pool.get_ref().clone());
    let cancelled = service
        .cancel_booking(
            &to_actor(&actor.0),
            booking_id,
            Some(request.cancellation_reason.clone()),
        )
        .await?;

    Ok(HttpResponse::Ok().json(cancelled))
}

/// Cancels the authenticated guest's own booking. The reason is optional;
/// a generic one is recorded when omitted.
pub async fn cancel_own_booking(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    path: web::Path<uuid::Uuid>,
    request: web::Json<CancelOwnBookingRequest>,
) -> Result<HttpResponse, BookingError> {
    let booking_id = path.into_inner();
    let service = BookingService::from_pool(pool.get_ref().clone());
    let cancelled = service
        .cancel_booking(
            &to_actor(&actor.0),
            booking_id,
            request.cancellation_reason.clone(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(cancelled))
}
