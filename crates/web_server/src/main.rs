//! Main entry point for the Campsite Bookings backend server.
//! This crate wires the REST API endpoints together and runs the HTTP server.

use actix_web::{App, HttpResponse, HttpServer, Result, middleware::Logger, web};
use auth_services::middleware::AuthMiddleware;
use postgres::database::*;
use web_handlers::*;

async fn api_hello() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Campsite bookings API",
        "status": "running"
    })))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting campsite bookings server...");

    // Create database connection pool
    let pool = match create_connection_pool().await {
        Ok(pool) => {
            log::info!("🗃️ Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("❌ Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("❌ Failed to create database pool: {}", e);
            log::error!("💡 Make sure PostgreSQL is running and DATABASE_URL is set");
            std::process::exit(1);
        }
    };

    log::info!("🌐 Server will be available at: http://0.0.0.0:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    // Public routes
                    .route("/hello", web::get().to(api_hello))
                    .service(
                        web::scope("/auth")
                            .route("/health", web::get().to(auth_health))
                            .route("/signup", web::post().to(signup))
                            .route("/login", web::post().to(login)),
                    )
                    // Protected routes (require authentication)
                    .service(
                        web::scope("/user")
                            .wrap(AuthMiddleware)
                            .route("/profile", web::get().to(get_profile)),
                    )
                    // Availability check is public; the booking routes behind
                    // it require authentication.
                    .route(
                        "/bookings/check-availability",
                        web::post().to(check_availability),
                    )
                    .service(
                        web::scope("/bookings")
                            .wrap(AuthMiddleware)
                            .route("/create", web::post().to(create_booking))
                            .route("/my-bookings", web::get().to(my_bookings))
                            .route(
                                "/campground/{campground_id}",
                                web::get().to(campground_bookings),
                            )
                            .route("/{booking_id}/cancel", web::post().to(cancel_booking))
                            .route(
                                "/{booking_id}/cancel-booking",
                                web::post().to(cancel_own_booking),
                            ),
                    )
                    // Campground routes: listing and detail are public, the
                    // mutating methods authenticate via the actor extractor.
                    .service(
                        web::resource("/campgrounds")
                            .route(web::get().to(list_campgrounds))
                            .route(web::post().to(create_campground)),
                    )
                    .service(
                        web::resource("/campgrounds/mine")
                            .route(web::get().to(my_campgrounds)),
                    )
                    .service(
                        web::resource("/campgrounds/{campground_id}")
                            .route(web::get().to(get_campground))
                            .route(web::put().to(update_campground))
                            .route(web::delete().to(delete_campground)),
                    ),
            )
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("OK") }),
            )
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
