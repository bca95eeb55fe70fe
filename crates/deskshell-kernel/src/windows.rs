//! Window manager seam.
//!
//! `ps` lists open windows as processes and `kill` closes them. The desktop
//! host supplies the real window manager; [`InMemoryWindows`] backs the REPL
//! and tests.

use std::sync::Mutex;

use deskshell_types::WindowInfo;

/// Read and close access to the desktop's open windows.
pub trait WindowManager: Send + Sync {
    /// Currently open windows, in stacking or creation order.
    fn windows(&self) -> Vec<WindowInfo>;

    /// Ask the window with `id` to close. Returns false if no such window.
    fn close(&self, id: &str) -> bool;
}

/// A window list held in memory.
#[derive(Debug, Default)]
pub struct InMemoryWindows {
    windows: Mutex<Vec<WindowInfo>>,
    next_id: Mutex<u64>,
}

impl InMemoryWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given windows open.
    pub fn with_windows(windows: impl IntoIterator<Item = WindowInfo>) -> Self {
        Self {
            windows: Mutex::new(windows.into_iter().collect()),
            next_id: Mutex::new(0),
        }
    }

    /// Open a window for `app` and return its id.
    pub fn open(&self, app: &str, title: &str) -> String {
        let id = match self.next_id.lock() {
            Ok(mut next) => {
                *next += 1;
                format!("{}-{}", app, *next)
            }
            Err(_) => format!("{}-0", app),
        };
        if let Ok(mut windows) = self.windows.lock() {
            windows.push(WindowInfo::new(id.clone(), app, title));
        }
        tracing::debug!(id = %id, app, "window opened");
        id
    }
}

impl WindowManager for InMemoryWindows {
    fn windows(&self) -> Vec<WindowInfo> {
        self.windows.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn close(&self, id: &str) -> bool {
        let Ok(mut windows) = self.windows.lock() else {
            return false;
        };
        let before = windows.len();
        windows.retain(|w| w.id != id);
        let closed = windows.len() != before;
        if closed {
            tracing::debug!(id, "window closed");
        }
        closed
    }
}

/// Deterministic pseudo-PID for a window id: `1000 + fnv1a(id) % 9000`.
///
/// Always lands in `1000..10000`, clear of the fixed system rows.
pub fn pseudo_pid(window_id: &str) -> u32 {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let hash = window_id
        .bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME));
    1000 + hash % 9000
}
