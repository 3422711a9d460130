//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Security headers (strict CSP, no framing, no caching)
//! 5. Session layer (tower-sessions, SameSite=Strict)
//! 6. Session expiry (signs out when the backend rejected the token)
//!
//! The login POST additionally carries a governor rate limiter.

pub mod auth;
pub mod context;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AdminAuthRejection, RequireAdminAuth, clear_current_admin, expire_rejected_sessions,
    set_current_admin,
};
pub use context::{FlashView, PageContext};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
