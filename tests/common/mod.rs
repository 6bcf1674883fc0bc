#![allow(dead_code)]

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tripwise::{
    session::{SessionData, SessionKeys, SessionUser, SESSION_COOKIE},
    state::AppState,
};
use uuid::Uuid;

pub fn user(id: Uuid, username: &str) -> SessionUser {
    SessionUser {
        id,
        username: username.into(),
        name: username.to_uppercase(),
    }
}

pub fn cookie_for(state: &AppState, data: &SessionData) -> String {
    let token = SessionKeys::from_ref(state).sign(data).expect("sign session");
    format!("{SESSION_COOKIE}={token}")
}

pub fn user_cookie(state: &AppState, user: SessionUser) -> String {
    cookie_for(
        state,
        &SessionData {
            user: Some(user),
            ..Default::default()
        },
    )
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    b.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut b = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    b.body(Body::from(body.to_string())).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut b = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    b.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("router is infallible")
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location(resp: &Response<Body>) -> &str {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
}

/// The session cookie set by a response, as a `Cookie` header value.
/// `None` when the response removed or did not touch the session.
pub fn set_session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE}=")))
        .filter(|pair| pair.len() > SESSION_COOKIE.len() + 1)
        .map(str::to_string)
}

/// Decode the session a response wrote back.
pub fn session_after(state: &AppState, resp: &Response<Body>) -> SessionData {
    match set_session_cookie(resp) {
        Some(pair) => {
            let token = &pair[SESSION_COOKIE.len() + 1..];
            SessionKeys::from_ref(state).verify(token).expect("valid session cookie")
        }
        None => SessionData::default(),
    }
}
