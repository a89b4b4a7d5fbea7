//! Session and the typed operations built on top of it.

mod notification;
mod resources;
mod session;

pub use notification::NOTIFICATION_MAX_SIZE;
pub use session::{ApiResponse, Session};

/// Header carrying the pinned API version, sent only when one is set.
pub const API_VERSION_HEADER: &str = "PayPlug-Version";
