use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::Value;
use tera::Context;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{GenerateForm, RateResponse, TripRequest},
    repo_types::Trip,
    services::{generate_trip, parse_rating, GenerateError},
};
use crate::{
    error::AppError,
    images::{image_or_fallback, DEFAULT_IMAGE_URL},
    pdf::{attachment_filename, PdfError},
    session::Session,
    state::AppState,
    web::page::{redirect, redirect_to_login, render},
};

pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/rate-trip/:id", post(rate_trip))
        .route("/download-pdf/:id", get(download_pdf))
}

pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    if session.user().is_none() {
        return Ok(redirect_to_login(session));
    }
    let mut ctx = Context::new();
    ctx.insert("body_class", "home-page");
    render(&state.templates, session, "index.html", ctx)
}

#[instrument(skip(state, session, form))]
pub async fn generate(
    State(state): State<AppState>,
    mut session: Session,
    form: Result<Form<GenerateForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Some(user_id) = session.user().map(|u| u.id) else {
        session.flash_error("Please log in to generate an itinerary.");
        return Ok(redirect_to_login(session));
    };

    let Ok(Form(form)) = form else {
        session.flash_error("Please fill in every field of the trip form.");
        return Ok(redirect(session, "/"));
    };
    let req = match TripRequest::try_from(form) {
        Ok(r) => r,
        Err(msg) => {
            session.flash_error(msg);
            return Ok(redirect(session, "/"));
        }
    };

    let (trip, payload) = match generate_trip(&state, user_id, &req).await {
        Ok(v) => v,
        Err(GenerateError::Model(e)) => {
            warn!(error = %e, "itinerary generation failed");
            session.flash_error(generation_failed(&e));
            return Ok(redirect(session, "/"));
        }
        Err(GenerateError::Database(e)) => {
            error!(error = %e, "saving generated trip failed");
            session.flash_error(generation_failed(&e));
            return Ok(redirect(session, "/"));
        }
    };

    let image_url = image_or_fallback(state.images.as_ref(), &req.destination, DEFAULT_IMAGE_URL).await;

    let mut ctx = Context::new();
    ctx.insert("trip_id", &trip.id);
    ctx.insert("itinerary", &payload.itinerary);
    ctx.insert("destination", &trip.destination);
    ctx.insert("days", &trip.days);
    ctx.insert("trip_type", &trip.trip_type);
    ctx.insert("image_url", &image_url);
    ctx.insert("estimated_cost", &payload.estimated_cost);
    render(&state.templates, session, "results.html", ctx)
}

fn generation_failed(e: &dyn std::fmt::Display) -> String {
    format!(
        "An error occurred. The AI might be busy or the response was malformed. \
         Please try again. Error: {e}"
    )
}

fn rate_reply(status: StatusCode, success: bool, message: &str) -> Response {
    (status, Json(RateResponse::new(success, message))).into_response()
}

#[instrument(skip(state, session, body))]
pub async fn rate_trip(
    State(state): State<AppState>,
    session: Session,
    id: Result<Path<Uuid>, PathRejection>,
    body: Option<Json<Value>>,
) -> Response {
    let Some(user_id) = session.user().map(|u| u.id) else {
        return rate_reply(StatusCode::UNAUTHORIZED, false, "Authentication required");
    };

    let Some(rating) = body.and_then(|Json(v)| parse_rating(&v)) else {
        return rate_reply(StatusCode::BAD_REQUEST, false, "Invalid rating");
    };

    // A malformed id cannot name any trip.
    let Ok(Path(id)) = id else {
        return rate_reply(
            StatusCode::NOT_FOUND,
            false,
            "Trip not found or permission denied",
        );
    };

    match Trip::set_rating(&state.db, id, user_id, rating).await {
        Ok(0) => rate_reply(
            StatusCode::NOT_FOUND,
            false,
            "Trip not found or permission denied",
        ),
        Ok(_) => {
            info!(trip_id = %id, %user_id, rating, "trip rated");
            rate_reply(StatusCode::OK, true, "Thank you for your feedback!")
        }
        Err(e) => {
            error!(error = %e, trip_id = %id, "saving rating failed");
            rate_reply(StatusCode::INTERNAL_SERVER_ERROR, false, "An error occurred")
        }
    }
}

#[instrument(skip(state, session))]
pub async fn download_pdf(
    State(state): State<AppState>,
    mut session: Session,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Some(user_id) = session.user().map(|u| u.id) else {
        return Ok(redirect_to_login(session));
    };

    let trip = match id {
        Ok(Path(id)) => Trip::find_for_user(&state.db, id, user_id).await?,
        Err(_) => None,
    };
    let Some(trip) = trip else {
        warn!(%user_id, "pdf requested for missing or foreign trip");
        session.flash_error("Itinerary not found or you do not have permission to access it.");
        return Ok(redirect(session, "/"));
    };

    let payload = trip.payload()?;
    let mut ctx = Context::new();
    ctx.insert("itinerary", &payload.itinerary);
    ctx.insert("destination", &trip.destination);
    ctx.insert("days", &trip.days);
    ctx.insert("trip_type", &trip.trip_type);
    ctx.insert("travelers", &trip.travelers);
    ctx.insert("budget", &trip.budget);
    ctx.insert("estimated_cost", &trip.estimated_cost);
    let html = state.templates.render("itinerary_pdf.html", &ctx)?;

    match state.pdf.render(&html).await {
        Ok(pdf) => Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", attachment_filename(&trip.destination)),
                ),
            ],
            pdf,
        )
            .into_response()),
        Err(e @ PdfError::Unavailable { .. }) => {
            error!(error = %e, "pdf engine unavailable");
            session.flash_error(
                "PDF generation is not available because the server is missing the PDF engine.",
            );
            Ok(redirect(session, "/"))
        }
        Err(e) => {
            error!(error = %e, trip_id = %trip.id, "pdf rendering failed");
            session.flash_error("Could not generate the PDF. Please try again.");
            Ok(redirect(session, "/"))
        }
    }
}
