//! Session-stored state for the dashboard.

pub mod flash;
pub mod session;

pub use flash::{Flash, FlashKind};
pub use session::{CurrentAdmin, keys};
