//! Session-backed shopper state.
//!
//! The backend has no notion of anonymous carts or wishlists, so both live in
//! the shopper's session and are sent to the backend only at checkout.

pub mod cart;
pub mod flash;
pub mod session;
pub mod wishlist;

pub use cart::{Cart, CartError, CartLine, MAX_LINE_QUANTITY};
pub use flash::{Flash, FlashKind};
pub use wishlist::{MAX_WISHLIST_ITEMS, Wishlist, WishlistError};
