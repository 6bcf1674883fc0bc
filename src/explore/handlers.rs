use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use tera::Context;
use tracing::{instrument, warn};

use super::services::{
    category_title, destinations_prompt, parse_destinations, CategoryTile, DestinationCard,
    CATEGORIES,
};
use crate::{
    error::AppError,
    images::{image_or_fallback, DEFAULT_IMAGE_URL, PLACEHOLDER_IMAGE_URL},
    session::Session,
    state::AppState,
    web::page::{redirect, redirect_to_login, render},
};

pub fn explore_routes() -> Router<AppState> {
    Router::new()
        .route("/explore", get(explore))
        .route("/explore/:category", get(explore_category))
}

#[instrument(skip(state, session))]
pub async fn explore(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    if session.user().is_none() {
        return Ok(redirect_to_login(session));
    }

    let mut tiles = Vec::with_capacity(CATEGORIES.len());
    for c in CATEGORIES {
        let image_url = image_or_fallback(state.images.as_ref(), c.query, PLACEHOLDER_IMAGE_URL).await;
        tiles.push(CategoryTile {
            name: c.name,
            slug: c.slug,
            image_url,
        });
    }

    let mut ctx = Context::new();
    ctx.insert("categories", &tiles);
    ctx.insert("body_class", "explore-page");
    render(&state.templates, session, "explore.html", ctx)
}

#[instrument(skip(state, session))]
pub async fn explore_category(
    State(state): State<AppState>,
    mut session: Session,
    Path(category): Path<String>,
) -> Result<Response, AppError> {
    if session.user().is_none() {
        return Ok(redirect_to_login(session));
    }

    let suggestions = match state.ai.generate(&destinations_prompt(&category)).await {
        Ok(text) => parse_destinations(&text),
        Err(e) => Err(e),
    };
    let destinations = match suggestions {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, %category, "destination suggestions failed");
            session.flash_error(format!(
                "An error occurred while fetching destinations. Please try again. Error: {e:#}"
            ));
            return Ok(redirect(session, "/explore"));
        }
    };

    let mut cards = Vec::with_capacity(destinations.len());
    for d in destinations {
        let query = format!("travel {}", d.name);
        let image_url = image_or_fallback(state.images.as_ref(), &query, DEFAULT_IMAGE_URL).await;
        cards.push(DestinationCard {
            name: d.name,
            description: d.description,
            image_url,
        });
    }

    let mut ctx = Context::new();
    ctx.insert("category_title", &category_title(&category));
    ctx.insert("destinations", &cards);
    ctx.insert("body_class", "destinations-page");
    render(&state.templates, session, "destinations.html", ctx)
}
