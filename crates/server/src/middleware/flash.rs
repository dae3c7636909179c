//! One-time flash messages carried across redirects.
//!
//! A flash is stored in the session when a handler redirects and
//! consumed (removed) by the next page render.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "shopkart.flash";

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A one-time user-facing notice attached to a redirect response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// A failure notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Whether this is a success notice (used by templates for styling).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == FlashKind::Success
    }
}

/// Store a flash message in the session.
///
/// Session store failures are logged and swallowed; losing a notice is
/// preferable to failing the request that produced it.
pub async fn set(session: &Session, message: FlashMessage) {
    if let Err(e) = session.insert(FLASH_KEY, message).await {
        tracing::warn!(error = %e, "failed to store flash message");
    }
}

/// Take (and clear) the pending flash message, if any.
pub async fn take(session: &Session) -> Option<FlashMessage> {
    match session.remove::<FlashMessage>(FLASH_KEY).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read flash message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_flash() {
        let flash = FlashMessage::success("Product added successfully");
        assert!(flash.is_success());
        assert_eq!(flash.message, "Product added successfully");
    }

    #[test]
    fn test_error_flash() {
        let flash = FlashMessage::error("Failed to delete product");
        assert!(!flash.is_success());
    }

    #[test]
    fn test_flash_serde_round_trip() {
        let flash = FlashMessage::error("boom");
        let json = serde_json::to_string(&flash).expect("serialize");
        let back: FlashMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, flash);
    }
}
