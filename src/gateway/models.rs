//! Backend wire models.

use serde::Deserialize;

use crate::session::models::Identity;

/// Account row returned by the backend's verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifiedUser {
    /// Backend row identifier, used to tag subsequent requests.
    pub id: i64,

    /// Telegram account identifier.
    #[serde(default)]
    pub telegram_id: Option<String>,

    /// Telegram handle or substituted display name.
    #[serde(default)]
    pub username: Option<String>,

    /// Profile photo URL.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl VerifiedUser {
    /// Converts the backend row into a session identity.
    #[must_use]
    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            telegram_id: self.telegram_id,
            first_name: String::new(),
            last_name: None,
            username: self.username,
            photo_url: self.photo_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_the_verification_row() -> TestResult {
        let raw = r#"{"id": 42, "telegram_id": "987654321", "username": "ada", "photo_url": "/images/default_avatar.png"}"#;

        let user: VerifiedUser = serde_json::from_str(raw)?;
        let identity = user.into_identity();

        assert_eq!(identity.id, 42);
        assert_eq!(identity.telegram_id.as_deref(), Some("987654321"));
        assert_eq!(identity.display_name(), "@ada");

        Ok(())
    }
}
