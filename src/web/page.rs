use axum::response::{Html, IntoResponse, Redirect, Response};
use tera::{Context, Tera};

use crate::{error::AppError, session::Session};

/// Render `template` with the session's pending flashes and login state.
///
/// Flashes are consumed, so the returned session must be written back with
/// the response.
pub fn render(
    tera: &Tera,
    mut session: Session,
    template: &str,
    mut ctx: Context,
) -> Result<Response, AppError> {
    ctx.insert("flashes", &session.take_flashes());
    ctx.insert("current_user", &session.user());
    ctx.insert("is_admin", &session.is_admin());
    let html = tera.render(template, &ctx)?;
    Ok((session, Html(html)).into_response())
}

pub fn redirect(session: Session, to: &str) -> Response {
    (session, Redirect::to(to)).into_response()
}

pub fn redirect_to_login(session: Session) -> Response {
    redirect(session, "/login")
}
