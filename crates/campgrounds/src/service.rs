use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use bookings::policy::{Actor, can_manage_campground};

use crate::types::*;

/// Service for handling campground listing operations
pub struct CampgroundService {
    pool: PgPool,
}

const CAMPGROUND_COLUMNS: &str = "id, title, location, description, price_type, nightly_rate, \
     latitude, longitude, owner_id, created_at";

fn campground_from_row(row: &PgRow) -> Campground {
    Campground {
        id: row.get("id"),
        title: row.get("title"),
        location: row.get("location"),
        description: row.get("description"),
        price_type: row.get("price_type"),
        nightly_rate: row.get("nightly_rate"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
    }
}

impl CampgroundService {
    /// Creates a new instance of `CampgroundService` with the provided database connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new campground listing owned by the given user
    pub async fn create(
        &self,
        owner_id: &Uuid,
        request: &CreateCampgroundRequest,
    ) -> Result<Campground, CampgroundError> {
        let nightly_rate = resolve_nightly_rate(&request.price_type, request.price_amount)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO campgrounds (
                title, location, description, price_type, nightly_rate,
                latitude, longitude, owner_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CAMPGROUND_COLUMNS}
            "#,
        ))
        .bind(request.title.trim())
        .bind(request.location.trim())
        .bind(&request.description)
        .bind(&request.price_type)
        .bind(nightly_rate)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(campground_from_row(&row))
    }

    /// Retrieves a campground by id
    pub async fn get(&self, campground_id: &Uuid) -> Result<Campground, CampgroundError> {
        let row = sqlx::query(&format!(
            "SELECT {CAMPGROUND_COLUMNS} FROM campgrounds WHERE id = $1"
        ))
        .bind(campground_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(campground_from_row(&row)),
            None => Err(CampgroundError::NotFound),
        }
    }

    /// Updates a campground listing. Only the owner or an administrator may.
    pub async fn update(
        &self,
        actor: &Actor,
        campground_id: &Uuid,
        request: &UpdateCampgroundRequest,
    ) -> Result<Campground, CampgroundError> {
        let existing = self.get(campground_id).await?;

        if !can_manage_campground(actor, existing.owner_id) {
            return Err(CampgroundError::Forbidden);
        }

        let nightly_rate = resolve_nightly_rate(&request.price_type, request.price_amount)?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE campgrounds
            SET title = $1,
                location = $2,
                description = $3,
                price_type = $4,
                nightly_rate = $5,
                latitude = $6,
                longitude = $7
            WHERE id = $8
            RETURNING {CAMPGROUND_COLUMNS}
            "#,
        ))
        .bind(request.title.trim())
        .bind(request.location.trim())
        .bind(&request.description)
        .bind(&request.price_type)
        .bind(nightly_rate)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(campground_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(campground_from_row(&row))
    }

    /// Deletes a campground listing. Only the owner or an administrator may.
    pub async fn delete(
        &self,
        actor: &Actor,
        campground_id: &Uuid,
    ) -> Result<(), CampgroundError> {
        let existing = self.get(campground_id).await?;

        if !can_manage_campground(actor, existing.owner_id) {
            return Err(CampgroundError::Forbidden);
        }

        sqlx::query("DELETE FROM campgrounds WHERE id = $1")
            .bind(campground_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists all campgrounds, newest first
    pub async fn list(&self) -> Result<Vec<Campground>, CampgroundError> {
        let rows = sqlx::query(&format!(
            "SELECT {CAMPGROUND_COLUMNS} FROM campgrounds ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(campground_from_row).collect())
    }

    /// Lists the owner's campgrounds with confirmed-booking counts.
    ///
    /// The counts come from the bookings table at query time; the booking
    /// store stays the single source of truth.
    pub async fn list_for_owner(
        &self,
        owner_id: &Uuid,
    ) -> Result<Vec<CampgroundWithStats>, CampgroundError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CAMPGROUND_COLUMNS},
                (SELECT COUNT(*) FROM bookings b
                 WHERE b.campground_id = campgrounds.id
                   AND b.status = 'confirmed') AS total_bookings
            FROM campgrounds
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| CampgroundWithStats {
                campground: campground_from_row(row),
                total_bookings: row.get("total_bookings"),
            })
            .collect())
    }
}
