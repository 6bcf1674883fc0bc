use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, error};

use super::{
    claims::{Flash, FlashLevel, SessionData, SessionUser},
    keys::SessionKeys,
};

pub const SESSION_COOKIE: &str = "tripwise_session";

/// Request session read from the signed cookie.
///
/// A missing, expired or tampered cookie yields an empty session. Returning the
/// session as part of a response writes the (re-signed) cookie back, or removes
/// it once nothing is left to remember.
pub struct Session {
    data: SessionData,
    keys: SessionKeys,
    jar: CookieJar,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let data = match jar.get(SESSION_COOKIE) {
            Some(cookie) => keys.verify(cookie.value()).unwrap_or_else(|e| {
                debug!(error = %e, "discarding invalid session cookie");
                SessionData::default()
            }),
            None => SessionData::default(),
        };

        Ok(Session { data, keys, jar })
    }
}

impl Session {
    pub fn user(&self) -> Option<&SessionUser> {
        self.data.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.data.admin
    }

    pub fn login(&mut self, user: SessionUser) {
        self.data.user = Some(user);
    }

    pub fn set_admin(&mut self, admin: bool) {
        self.data.admin = admin;
    }

    /// Forget everything, including the admin role and pending flashes.
    pub fn clear(&mut self) {
        self.data = SessionData::default();
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            level,
            message: message.into(),
        });
    }

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.flash(FlashLevel::Error, message);
    }

    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.flash(FlashLevel::Success, message);
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.data.flashes)
    }

    pub fn into_jar(self) -> CookieJar {
        let Session { data, keys, jar } = self;
        if data.is_empty() {
            return jar.remove(removal_cookie());
        }
        match keys.sign(&data) {
            Ok(token) => jar.add(
                Cookie::build((SESSION_COOKIE, token))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .build(),
            ),
            Err(e) => {
                error!(error = %e, "session signing failed; dropping session");
                jar.remove(removal_cookie())
            }
        }
    }
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_jar().into_response_parts(res)
    }
}
