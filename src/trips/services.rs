use anyhow::Context;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ItineraryPayload, TripRequest},
    repo_types::{NewTrip, Trip},
};
use crate::{ai::strip_code_fences, state::AppState};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The model could not be reached or answered with something unusable.
    #[error("{0:#}")]
    Model(anyhow::Error),

    #[error("could not save trip: {0}")]
    Database(#[from] sqlx::Error),
}

pub fn itinerary_prompt(req: &TripRequest) -> String {
    let TripRequest {
        destination,
        days,
        trip_type,
        travelers,
        budget,
    } = req;
    format!(
        r#"
    You are an expert travel planner. Create a detailed travel itinerary and estimate the cost.
    The trip is for {travelers} person(s) to {destination} for {days} days.
    The travel style is {trip_type} with a {budget} budget.

    Provide a detailed day-by-day plan and a rough estimated cost for the entire trip in Indian Rupees (INR).

    IMPORTANT: Respond ONLY with a valid JSON object. The root object must have two keys: "itinerary" and "estimated_cost".

    1. The value of "itinerary" must be an array of day-objects.
       - Each day-object must have two keys: "day" (e.g., "Day 1: Arrival") and "plan".
       - The value of "plan" MUST be an array of activity-objects.
       - Each activity-object must have three string keys: "place", "time_to_spend", and "activity".

    2. The value of "estimated_cost" must be a single string (e.g., "₹80,000 - ₹1,20,000 INR for {travelers} people").
    "#
    )
}

/// Parse the model's answer. Returns the raw document, kept for storage, and
/// its typed view.
pub fn parse_itinerary(text: &str) -> anyhow::Result<(Value, ItineraryPayload)> {
    let cleaned = strip_code_fences(text);
    let raw: Value = serde_json::from_str(&cleaned).context("response is not valid JSON")?;
    let payload: ItineraryPayload =
        serde_json::from_value(raw.clone()).context("response does not match the itinerary schema")?;
    Ok((raw, payload))
}

/// A rating is accepted only as a JSON integer from 1 to 5.
pub fn parse_rating(body: &Value) -> Option<i32> {
    let n = body.get("rating")?.as_i64()?;
    (1..=5).contains(&n).then_some(n as i32)
}

/// Ask the model for an itinerary and persist it. Nothing is written unless
/// the answer parses.
#[instrument(skip(state, req), fields(destination = %req.destination))]
pub async fn generate_trip(
    state: &AppState,
    user_id: Uuid,
    req: &TripRequest,
) -> Result<(Trip, ItineraryPayload), GenerateError> {
    let text = state
        .ai
        .generate(&itinerary_prompt(req))
        .await
        .map_err(GenerateError::Model)?;
    let (raw, payload) = parse_itinerary(&text).map_err(GenerateError::Model)?;

    let itinerary_json = raw.to_string();
    let trip = Trip::create(
        &state.db,
        &NewTrip {
            user_id,
            destination: &req.destination,
            days: req.days,
            trip_type: &req.trip_type,
            travelers: req.travelers,
            budget: &req.budget,
            estimated_cost: &payload.estimated_cost,
            itinerary_json: &itinerary_json,
        },
    )
    .await?;

    info!(trip_id = %trip.id, %user_id, days = payload.itinerary.len(), "trip generated");
    Ok((trip, payload))
}
