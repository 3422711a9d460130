//! One-shot flash messages shown on the next rendered page.
//!
//! A flash stores a translation key rather than text so it renders in
//! whatever locale the next page uses. Backend-provided messages have no
//! matching key and render verbatim.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session::{self, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    /// CSS modifier used by the layout.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
            Self::Info => "flash-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub key: String,
}

impl Flash {
    /// Queue a flash for the next page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn push(
        session: &Session,
        kind: FlashKind,
        key: impl Into<String>,
    ) -> Result<(), tower_sessions::session::Error> {
        let mut queue: Vec<Self> = session::load(session, keys::FLASH).await?;
        queue.push(Self {
            kind,
            key: key.into(),
        });
        session::save(session, keys::FLASH, &queue).await
    }

    /// Remove and return every queued flash.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn drain(session: &Session) -> Result<Vec<Self>, tower_sessions::session::Error> {
        let queue = session.remove::<Vec<Self>>(keys::FLASH).await?;
        Ok(queue.unwrap_or_default())
    }

    pub async fn success(
        session: &Session,
        key: impl Into<String>,
    ) -> Result<(), tower_sessions::session::Error> {
        Self::push(session, FlashKind::Success, key).await
    }

    pub async fn error(
        session: &Session,
        key: impl Into<String>,
    ) -> Result<(), tower_sessions::session::Error> {
        Self::push(session, FlashKind::Error, key).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flashes_drain_once_in_order() {
        let session = session();
        Flash::success(&session, "cart.added").await.unwrap();
        Flash::error(&session, "cart.out_of_stock").await.unwrap();

        let flashes = Flash::drain(&session).await.unwrap();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].kind, FlashKind::Success);
        assert_eq!(flashes[1].key, "cart.out_of_stock");

        assert!(Flash::drain(&session).await.unwrap().is_empty());
    }

    #[test]
    fn test_flash_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FlashKind::Success).unwrap(),
            "\"success\""
        );
    }
}
