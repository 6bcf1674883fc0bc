use serde::{Deserialize, Serialize};

/// One stop in a day's plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub time_to_spend: String,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub plan: Vec<Activity>,
}

/// The JSON document the model is asked to produce; stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItineraryPayload {
    #[serde(default)]
    pub itinerary: Vec<DayPlan>,
    #[serde(default = "cost_not_available")]
    pub estimated_cost: String,
}

fn cost_not_available() -> String {
    "Not available".to_string()
}

/// Planner form posted to `/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateForm {
    pub destination: String,
    pub days: String,
    pub trip_type: String,
    pub travelers: String,
    pub budget: String,
}

/// Planner input once the numeric fields have been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub destination: String,
    pub days: i32,
    pub trip_type: String,
    pub travelers: i32,
    pub budget: String,
}

impl TryFrom<GenerateForm> for TripRequest {
    type Error = &'static str;

    fn try_from(f: GenerateForm) -> Result<Self, Self::Error> {
        let destination = f.destination.trim().to_string();
        if destination.is_empty() {
            return Err("Please enter a destination.");
        }
        let days = f
            .days
            .trim()
            .parse::<i32>()
            .map_err(|_| "Days must be a whole number.")?;
        let travelers = f
            .travelers
            .trim()
            .parse::<i32>()
            .map_err(|_| "Travelers must be a whole number.")?;
        Ok(TripRequest {
            destination,
            days,
            trip_type: f.trip_type,
            travelers,
            budget: f.budget,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub success: bool,
    pub message: String,
}

impl RateResponse {
    pub fn new(success: bool, message: &str) -> Self {
        Self {
            success,
            message: message.to_string(),
        }
    }
}
