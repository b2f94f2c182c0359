//! Session identity models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The authenticated end-user attached to every backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Request-tagging identifier.
    pub id: i64,

    /// Telegram account identifier, when known.
    #[serde(default)]
    pub telegram_id: Option<String>,

    /// Given name from the host profile.
    #[serde(default)]
    pub first_name: String,

    /// Family name from the host profile.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Telegram handle, when the account has one.
    #[serde(default)]
    pub username: Option<String>,

    /// Profile photo URL, when the account has one.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Identity {
    /// Clearly marked stand-in used outside production when the host offers
    /// nothing verifiable.
    #[must_use]
    pub fn stand_in() -> Self {
        Self {
            id: 123_456,
            telegram_id: None,
            first_name: "Тестовый".to_owned(),
            last_name: Some("Пользователь".to_owned()),
            username: Some("test_user".to_owned()),
            photo_url: None,
        }
    }

    /// Best display name available for the account.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut name = self.first_name.trim().to_owned();

        if let Some(last) = self.last_name.as_deref().map(str::trim)
            && !last.is_empty()
        {
            if name.is_empty() {
                name = last.to_owned();
            } else {
                name = format!("{name} {last}");
            }
        }

        if !name.is_empty() {
            return name;
        }

        if let Some(username) = self.username.as_deref() {
            return format!("@{username}");
        }

        format!("user {}", self.id)
    }
}

/// Durable per-device session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The established identity.
    pub user: Identity,

    /// Whether the identity was confirmed by the backend rather than assumed
    /// from an unsigned claim.
    pub verified: bool,

    /// When the session was established.
    pub established_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_a_host_user_object() -> TestResult {
        let raw = r#"{"id": 987654321, "first_name": "Ada", "username": "ada", "language_code": "en"}"#;

        let identity: Identity = serde_json::from_str(raw)?;

        assert_eq!(identity.id, 987_654_321);
        assert_eq!(identity.first_name, "Ada");
        assert_eq!(identity.username.as_deref(), Some("ada"));
        assert!(identity.telegram_id.is_none());

        Ok(())
    }

    #[test]
    fn display_name_prefers_full_name() {
        let identity = Identity {
            id: 7,
            telegram_id: None,
            first_name: "Ada".to_owned(),
            last_name: Some("Lovelace".to_owned()),
            username: Some("ada".to_owned()),
            photo_url: None,
        };

        assert_eq!(identity.display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_falls_back_to_handle_then_id() {
        let mut identity = Identity {
            id: 7,
            telegram_id: None,
            first_name: String::new(),
            last_name: None,
            username: Some("ada".to_owned()),
            photo_url: None,
        };

        assert_eq!(identity.display_name(), "@ada");

        identity.username = None;

        assert_eq!(identity.display_name(), "user 7");
    }

    #[test]
    fn stand_in_is_clearly_marked() {
        let identity = Identity::stand_in();

        assert_eq!(identity.id, 123_456);
        assert_eq!(identity.username.as_deref(), Some("test_user"));
    }
}
