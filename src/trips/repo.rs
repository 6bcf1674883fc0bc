use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewTrip, Trip};

const TRIP_COLUMNS: &str = "id, user_id, destination, days, trip_type, travelers, budget, \
                            estimated_cost, itinerary_json, rating, created_at";

impl Trip {
    pub async fn create(db: &PgPool, new: &NewTrip<'_>) -> Result<Trip, sqlx::Error> {
        sqlx::query_as::<_, Trip>(&format!(
            r#"
            INSERT INTO trips (user_id, destination, days, trip_type, travelers, budget,
                               estimated_cost, itinerary_json)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TRIP_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(new.destination)
        .bind(new.days)
        .bind(new.trip_type)
        .bind(new.travelers)
        .bind(new.budget)
        .bind(new.estimated_cost)
        .bind(new.itinerary_json)
        .fetch_one(db)
        .await
    }

    /// The trip, only if it belongs to `user_id`.
    pub async fn find_for_user(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Trip>, sqlx::Error> {
        sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Newest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Trip>, sqlx::Error> {
        sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Returns the number of rows updated; zero when the trip is missing or
    /// owned by someone else.
    pub async fn set_rating(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        rating: i32,
    ) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("UPDATE trips SET rating = $1 WHERE id = $2 AND user_id = $3")
            .bind(rating)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
