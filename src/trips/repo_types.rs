use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::ItineraryPayload;

/// Trip record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination: String,
    pub days: i32,
    pub trip_type: String,
    pub travelers: i32,
    pub budget: String,
    pub estimated_cost: Option<String>,
    pub itinerary_json: String,
    pub rating: Option<i32>,
    pub created_at: OffsetDateTime,
}

impl Trip {
    pub fn payload(&self) -> anyhow::Result<ItineraryPayload> {
        Ok(serde_json::from_str(&self.itinerary_json)?)
    }
}

#[derive(Debug)]
pub struct NewTrip<'a> {
    pub user_id: Uuid,
    pub destination: &'a str,
    pub days: i32,
    pub trip_type: &'a str,
    pub travelers: i32,
    pub budget: &'a str,
    pub estimated_cost: &'a str,
    pub itinerary_json: &'a str,
}
