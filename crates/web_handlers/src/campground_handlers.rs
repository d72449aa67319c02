use actix_web::{HttpResponse, Result, web};
use validator::Validate;

use auth_services::middleware::AuthenticatedActor;
use campgrounds::{
    CampgroundError, CampgroundService, CreateCampgroundRequest, ListCampgroundsResponse,
    MyCampgroundsResponse, UpdateCampgroundRequest,
};

use crate::to_actor;

/// Lists all campground listings, newest first.
pub async fn list_campgrounds(
    pool: web::Data<sqlx::PgPool>,
) -> Result<HttpResponse, CampgroundError> {
    let service = CampgroundService::new(pool.get_ref().clone());
    let campgrounds = service.list().await?;

    let response = ListCampgroundsResponse {
        total: campgrounds.len() as i64,
        campgrounds,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Gets a single campground listing.
pub async fn get_campground(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, CampgroundError> {
    let campground_id = path.into_inner();
    let service = CampgroundService::new(pool.get_ref().clone());
    let campground = service.get(&campground_id).await?;

    Ok(HttpResponse::Ok().json(campground))
}

/// Creates a campground listing owned by the authenticated user.
pub async fn create_campground(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    request: web::Json<CreateCampgroundRequest>,
) -> Result<HttpResponse, CampgroundError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| CampgroundError::Validation(format!("Validation error: {}", e)))?;

    let service = CampgroundService::new(pool.get_ref().clone());
    let campground = service.create(&actor.0.id, &request).await?;

    Ok(HttpResponse::Created().json(campground))
}

/// Updates a campground listing. Owner or administrator only.
pub async fn update_campground(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdateCampgroundRequest>,
) -> Result<HttpResponse, CampgroundError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| CampgroundError::Validation(format!("Validation error: {}", e)))?;

    let campground_id = path.into_inner();
    let service = CampgroundService::new(pool.get_ref().clone());
    let campground = service
        .update(&to_actor(&actor.0), &campground_id, &request)
        .await?;

    Ok(HttpResponse::Ok().json(campground))
}

/// Deletes a campground listing. Owner or administrator only.
pub async fn delete_campground(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, CampgroundError> {
    let campground_id = path.into_inner();
    let service = CampgroundService::new(pool.get_ref().clone());
    service.delete(&to_actor(&actor.0), &campground_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Lists the authenticated user's campgrounds with booking statistics.
pub async fn my_campgrounds(
    pool: web::Data<sqlx::PgPool>,
    actor: AuthenticatedActor,
) -> Result<HttpResponse, CampgroundError> {
    let service = CampgroundService::new(pool.get_ref().clone());
    let campgrounds = service.list_for_owner(&actor.0.id).await?;

    let response = MyCampgroundsResponse {
        total: campgrounds.len() as i64,
        campgrounds,
    };

    Ok(HttpResponse::Ok().json(response))
}
