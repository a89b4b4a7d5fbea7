//! Application state shared across all request handlers.

use payplug_sdk::Session;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Session used to re-fetch notified resources from PayPlug.
    pub session: Arc<Session>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}
