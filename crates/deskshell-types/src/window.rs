//! Window descriptions shared with the desktop's window manager.

use serde::{Deserialize, Serialize};

/// An open desktop window, as reported by the window manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Window manager's identifier for the window.
    pub id: String,
    /// Owning application (e.g. "terminal", "browser").
    pub app: String,
    /// Title bar text.
    #[serde(default)]
    pub title: String,
}

impl WindowInfo {
    /// Create a window description.
    pub fn new(id: impl Into<String>, app: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            app: app.into(),
            title: title.into(),
        }
    }
}
