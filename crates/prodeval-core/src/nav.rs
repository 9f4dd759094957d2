//! Page navigation side effects.
//!
//! The auth helper and the API client redirect the user (to the login page
//! on an expired session, to the home page when already signed in). They do
//! so through a [`Navigator`] so the host decides what "go to this page"
//! means.

use std::sync::Mutex;

use tracing::debug;

pub trait Navigator: Send + Sync {
    /// Send the user to `location` (an app-relative path such as `/login`).
    fn navigate(&self, location: &str);
}

/// Navigator that records every requested location in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently requested location
    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        debug!(location, "Navigating");
        self.visits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_tracks_history() {
        let nav = RecordingNavigator::new();
        assert_eq!(nav.current(), None);

        nav.navigate("/login");
        nav.navigate("/");

        assert_eq!(nav.current().as_deref(), Some("/"));
        assert_eq!(nav.history(), vec!["/login".to_string(), "/".to_string()]);
    }
}
