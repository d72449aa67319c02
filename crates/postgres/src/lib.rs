//! # Postgres
//!
//! This crate provides a client for the Campsite Bookings application to interact with a PostgreSQL database.

/// Database client for the campsite bookings application.
pub mod database;
