//! Session-related types for admin authentication.

use bazaar_core::{AuthUser, UserId};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Session-stored admin identity.
///
/// The backend token is only ever exposed when building a request; `Debug`
/// shows it redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose_token", deserialize_with = "secret_token")]
    pub token: SecretString,
}

impl CurrentAdmin {
    #[must_use]
    pub fn new(user: AuthUser, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            token: SecretString::from(token),
        }
    }
}

// The session store is server-side; only the session id reaches the browser.
fn expose_token<S: Serializer>(token: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(token.expose_secret())
}

fn secret_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Session keys.
pub mod keys {
    /// The logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
    /// Chosen UI language.
    pub const LOCALE: &str = "locale";
    /// Queued flash messages.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn admin() -> CurrentAdmin {
        CurrentAdmin {
            id: UserId::new(1),
            name: "Huda".into(),
            email: "huda@example.sa".into(),
            token: SecretString::from("tok_123"),
        }
    }

    #[test]
    fn test_token_survives_session_round_trip() {
        let json = serde_json::to_value(admin()).unwrap();
        let back: CurrentAdmin = serde_json::from_value(json).unwrap();
        assert_eq!(back.token.expose_secret(), "tok_123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", admin());
        assert!(!debug.contains("tok_123"));
    }
}
