mod claims;
mod extractors;
mod keys;

pub use claims::{Flash, FlashLevel, SessionData, SessionUser};
pub use extractors::{Session, SESSION_COOKIE};
pub use keys::SessionKeys;
