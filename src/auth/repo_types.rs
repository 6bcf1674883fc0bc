use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub number: String, // phone number
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never rendered
    pub created_at: OffsetDateTime,
}

/// Fields needed to insert a user.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub number: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("username or email already exists")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
