use axum::{
    extract::State,
    response::Response,
    routing::get,
    Form, Router,
};
use tera::Context;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        password::{hash_password, verify_password},
        repo_types::{CreateUserError, NewUser, User},
    },
    error::AppError,
    session::{Session, SessionUser},
    state::AppState,
    web::page::{redirect, redirect_to_login, render},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

fn auth_page(state: &AppState, session: Session, template: &str) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("body_class", "auth-page");
    render(&state.templates, session, template, ctx)
}

pub async fn register_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    auth_page(&state, session, "register.html")
}

#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if form.username.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty() {
        session.flash_error("Please fill in all required fields.");
        return auth_page(&state, session, "register.html");
    }

    let hash = hash_password(&form.password)?;
    let new = NewUser {
        name: &form.name,
        email: &form.email,
        number: &form.number,
        username: &form.username,
        password_hash: &hash,
    };

    match User::create(&state.db, &new).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user registered");
            session.flash_success("Registration successful! Please log in.");
            Ok(redirect_to_login(session))
        }
        Err(CreateUserError::Duplicate) => {
            warn!("username or email already registered");
            session.flash_error("Username or Email already exists. Please choose another.");
            auth_page(&state, session, "register.html")
        }
        Err(CreateUserError::Database(e)) => {
            error!(error = %e, "create user failed");
            Err(e.into())
        }
    }
}

pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    auth_page(&state, session, "login.html")
}

#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = User::find_by_username(&state.db, &form.username).await?;

    let verified = match &user {
        Some(u) => verify_password(&form.password, &u.password_hash).unwrap_or_else(|e| {
            error!(error = %e, user_id = %u.id, "stored password hash is unreadable");
            false
        }),
        None => false,
    };

    match user {
        Some(u) if verified => {
            info!(user_id = %u.id, "user logged in");
            session.login(SessionUser {
                id: u.id,
                username: u.username,
                name: u.name,
            });
            session.flash_success("Login successful!");
            Ok(redirect(session, "/"))
        }
        _ => {
            warn!("login failed");
            session.flash_error("Incorrect username or password.");
            auth_page(&state, session, "login.html")
        }
    }
}

pub async fn logout(mut session: Session) -> Response {
    session.clear();
    session.flash_success("You have been logged out.");
    redirect_to_login(session)
}
