use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    response::Response,
    routing::get,
    Form, Router,
};
use serde::{Deserialize, Serialize};
use tera::Context;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::User,
    error::AppError,
    session::Session,
    state::AppState,
    trips::Trip,
    web::page::{redirect, render},
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(admin_login_page).post(admin_login))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/user/:id", get(user_trips))
        .route("/admin/logout", get(admin_logout))
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub password: String,
}

/// User row as shown to admins.
#[derive(Debug, Serialize)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    number: String,
    username: String,
    joined: String,
}

impl From<User> for UserRow {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            joined: format_timestamp(u.created_at),
            name: u.name,
            email: u.email,
            number: u.number,
            username: u.username,
        }
    }
}

#[derive(Debug, Serialize)]
struct TripRow {
    id: Uuid,
    destination: String,
    days: i32,
    trip_type: String,
    travelers: i32,
    budget: String,
    estimated_cost: Option<String>,
    rating: Option<i32>,
    created_at: String,
}

impl From<Trip> for TripRow {
    fn from(t: Trip) -> Self {
        Self {
            id: t.id,
            created_at: format_timestamp(t.created_at),
            destination: t.destination,
            days: t.days,
            trip_type: t.trip_type,
            travelers: t.travelers,
            budget: t.budget,
            estimated_cost: t.estimated_cost,
            rating: t.rating,
        }
    }
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

fn admin_page(state: &AppState, session: Session, template: &str, mut ctx: Context) -> Result<Response, AppError> {
    ctx.insert("is_admin_page", &true);
    render(&state.templates, session, template, ctx)
}

pub async fn admin_login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("body_class", "auth-page");
    admin_page(&state, session, "admin_login.html", ctx)
}

#[instrument(skip_all)]
pub async fn admin_login(
    State(state): State<AppState>,
    mut session: Session,
    form: Result<Form<AdminLoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    // Single shared password, compared as plaintext.
    let accepted = matches!(&form, Ok(Form(f)) if f.password == state.config.admin_password);
    if accepted {
        info!("admin logged in");
        session.set_admin(true);
        return Ok(redirect(session, "/admin/dashboard"));
    }

    warn!("admin login failed");
    session.flash_error("Incorrect admin password.");
    let mut ctx = Context::new();
    ctx.insert("body_class", "auth-page");
    admin_page(&state, session, "admin_login.html", ctx)
}

#[instrument(skip_all)]
pub async fn dashboard(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    if !session.is_admin() {
        return Ok(redirect(session, "/admin/login"));
    }

    let users: Vec<UserRow> = User::list_all(&state.db)
        .await?
        .into_iter()
        .map(UserRow::from)
        .collect();

    let mut ctx = Context::new();
    ctx.insert("users", &users);
    ctx.insert("body_class", "admin-page");
    admin_page(&state, session, "admin_dashboard.html", ctx)
}

#[instrument(skip(state, session))]
pub async fn user_trips(
    State(state): State<AppState>,
    mut session: Session,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    if !session.is_admin() {
        return Ok(redirect(session, "/admin/login"));
    }

    let user = match &id {
        Ok(Path(id)) => User::find_by_id(&state.db, *id).await?,
        Err(_) => None,
    };
    let Some(user) = user else {
        session.flash_error("User not found.");
        return Ok(redirect(session, "/admin/dashboard"));
    };
    let trips: Vec<TripRow> = Trip::list_by_user(&state.db, user.id)
        .await?
        .into_iter()
        .map(TripRow::from)
        .collect();

    let mut ctx = Context::new();
    ctx.insert("user", &UserRow::from(user));
    ctx.insert("trips", &trips);
    ctx.insert("body_class", "admin-page");
    admin_page(&state, session, "admin_user_trips.html", ctx)
}

pub async fn admin_logout(mut session: Session) -> Response {
    session.set_admin(false);
    session.flash_success("You have been logged out from the admin panel.");
    redirect(session, "/admin/login")
}
