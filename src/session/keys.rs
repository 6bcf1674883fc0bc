use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::{Claims, SessionData};
use crate::{config::SessionConfig, state::AppState};

/// Signing and verification keys for the session cookie.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl SessionKeys {
    pub fn from_config(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs((cfg.ttl_hours.max(1) as u64) * 60 * 60),
        }
    }

    pub fn sign(&self, data: &SessionData) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            data: data.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = ?data.user.as_ref().map(|u| u.id), admin = data.admin, "session signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionData> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims.data)
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        SessionKeys::from_config(&state.config.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::claims::{Flash, FlashLevel, SessionUser};
    use uuid::Uuid;

    fn make_keys(secret: &str, issuer: &str) -> SessionKeys {
        SessionKeys::from_config(&SessionConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: "test-aud".into(),
            ttl_hours: 1,
        })
    }

    #[test]
    fn sign_and_verify_session() {
        let keys = make_keys("dev-secret", "test-issuer");
        let data = SessionData {
            user: Some(SessionUser {
                id: Uuid::new_v4(),
                username: "ana".into(),
                name: "Ana".into(),
            }),
            admin: true,
            flashes: vec![Flash {
                level: FlashLevel::Success,
                message: "Login successful!".into(),
            }],
        };
        let token = keys.sign(&data).expect("sign session");
        let decoded = keys.verify(&token).expect("verify session");
        assert_eq!(decoded, data);
    }

    #[test]
    fn verify_rejects_foreign_secret() {
        let good = make_keys("secret-a", "iss");
        let bad = make_keys("secret-b", "iss");
        let token = good.sign(&SessionData::default()).expect("sign");
        assert!(bad.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer() {
        let good = make_keys("same-secret", "good-iss");
        let bad = make_keys("same-secret", "bad-iss");
        let token = good.sign(&SessionData::default()).expect("sign");
        assert!(bad.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", "iss");
        assert!(keys.verify("not-a-token").is_err());
    }
}
