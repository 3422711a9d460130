//! One-shot flash messages shown on the next rendered page.
//!
//! Flashes hold translation keys. Backend messages have no matching key and
//! render as-is.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
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
        let mut queue: Vec<Self> = session.get(keys::FLASH).await?.unwrap_or_default();
        queue.push(Self {
            kind,
            key: key.into(),
        });
        session.insert(keys::FLASH, queue).await
    }

    /// Remove and return every queued flash.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn drain(session: &Session) -> Result<Vec<Self>, tower_sessions::session::Error> {
        Ok(session
            .remove::<Vec<Self>>(keys::FLASH)
            .await?
            .unwrap_or_default())
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

    #[tokio::test]
    async fn test_drain_empties_queue() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        Flash::success(&session, "admin.products.created").await.unwrap();
        Flash::error(&session, "The name has already been taken.").await.unwrap();

        let drained = Flash::drain(&session).await.unwrap();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, FlashKind::Success);
        assert!(Flash::drain(&session).await.unwrap().is_empty());
    }
}
