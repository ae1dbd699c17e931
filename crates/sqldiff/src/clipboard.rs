//! System clipboard access for copying statements

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("failed to copy: {0}")]
    Write(String),
}

/// Destination for copied text
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard, opened on first use.
///
/// The handle is kept for the life of the app: on X11 and Wayland the
/// copied text is served by this process and disappears with the handle.
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(not(target_os = "android"))]
    inner: Option<arboard::Clipboard>,
}

#[cfg(not(target_os = "android"))]
impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[cfg(target_os = "android")]
impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "not supported on this platform".to_string(),
        ))
    }
}
