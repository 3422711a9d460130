//! Session-related helpers.
//!
//! Values are stored as JSON under the keys below. A missing or unreadable
//! value loads as its default so a stale cookie never breaks a page.

use serde::{Serialize, de::DeserializeOwned};
use tower_sessions::Session;

/// Session keys for shopper state.
pub mod keys {
    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the wishlist.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the shopper's chosen locale.
    pub const LOCALE: &str = "locale";

    /// Key for pending flash messages.
    pub const FLASH: &str = "flash";

    /// Key for the most recently placed order.
    pub const LAST_ORDER: &str = "last_order";
}

/// Load a value from the session, falling back to its default.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load<T>(session: &Session, key: &str) -> Result<T, tower_sessions::session::Error>
where
    T: DeserializeOwned + Default,
{
    match session.get::<T>(key).await {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::warn!(key, error = %e, "Discarding unreadable session value");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Store a value in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save<T>(
    session: &Session,
    key: &str,
    value: &T,
) -> Result<(), tower_sessions::session::Error>
where
    T: Serialize + Sync,
{
    session.insert(key, value).await
}
