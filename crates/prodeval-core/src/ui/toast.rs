//! Toast notifications.
//!
//! [`Toaster`] creates toasts and owns their lifetime; a
//! [`NotificationSink`] displays them. [`ToastContainer`] is a sink that
//! keeps the live stack in memory and renders it as HTML.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, warn};

use super::format::escape_html;
use crate::config::Config;

/// How long a toast stays visible when no duration is given.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Delay between the fade-out starting and the toast being removed.
pub const FADE_OUT_DELAY: Duration = Duration::from_millis(300);

const CONTAINER_ID: &str = "toast-container";
const CONTAINER_CLASS: &str = "fixed bottom-4 right-4 z-50";
const TOAST_CLASS: &str = "mb-3 p-3 rounded-lg shadow-lg";
const FADE_CLASS: &str = "opacity-0 transition-opacity duration-300";

/// Severity of a toast, which picks its color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    pub fn bg_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-green-500",
            ToastKind::Error => "bg-red-500",
            ToastKind::Warning => "bg-yellow-500",
            ToastKind::Info => "bg-blue-500",
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-exclamation-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
            ToastKind::Info => "fa-info-circle",
        }
    }
}

impl From<&str> for ToastKind {
    /// Unrecognized names are shown as info.
    fn from(name: &str) -> Self {
        match name {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
    /// Set once the fade-out has started
    pub fading: bool,
}

impl Toast {
    pub fn to_html(&self) -> String {
        let fade = if self.fading {
            format!(" {}", FADE_CLASS)
        } else {
            String::new()
        };
        format!(
            concat!(
                r#"<div class="{} {} text-white{}" data-toast-id="{}">"#,
                r#"<div class="flex items-center">"#,
                r#"<i class="mr-2 fas {}"></i>"#,
                r#"<span>{}</span>"#,
                r#"<button class="ml-auto" data-dismiss="{}"><i class="fas fa-times"></i></button>"#,
                r#"</div></div>"#,
            ),
            TOAST_CLASS,
            self.kind.bg_class(),
            fade,
            self.id,
            self.kind.icon_class(),
            escape_html(&self.message),
            self.id,
        )
    }
}

/// Where toasts are displayed.
pub trait NotificationSink: Send + Sync {
    /// Show a new toast after every toast already on screen.
    fn append(&self, toast: Toast);

    /// Start the fade-out of a toast. Unknown ids are ignored.
    fn fade(&self, id: u64);

    /// Take a toast off screen. Unknown ids are ignored.
    fn remove(&self, id: u64);
}

/// Creates toasts and schedules their automatic removal.
pub struct Toaster {
    sink: Arc<dyn NotificationSink>,
    next_id: AtomicU64,
    default_duration: Duration,
}

impl Toaster {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            next_id: AtomicU64::new(1),
            default_duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn from_config(config: &Config, sink: Arc<dyn NotificationSink>) -> Self {
        Self::new(sink).with_default_duration(config.toast_duration())
    }

    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Show `message` and return the new toast's id.
    ///
    /// After `duration` (the toaster default when `None`) the toast starts
    /// fading and [`FADE_OUT_DELAY`] later it is removed. Scheduling needs a
    /// Tokio runtime; without one the toast stays until dismissed.
    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind, duration: Option<Duration>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let duration = duration.unwrap_or(self.default_duration);

        self.sink.append(Toast {
            id,
            message: message.into(),
            kind,
            duration,
            fading: false,
        });
        debug!(id, kind = kind.as_str(), "Toast shown");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let sink = Arc::clone(&self.sink);
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    sink.fade(id);
                    tokio::time::sleep(FADE_OUT_DELAY).await;
                    sink.remove(id);
                });
            }
            Err(_) => warn!(id, "No async runtime, toast will not auto-dismiss"),
        }

        id
    }

    /// Close a toast early, as its dismiss button does.
    pub fn dismiss(&self, id: u64) {
        self.sink.remove(id);
    }
}

#[derive(Debug, Default)]
struct ContainerState {
    created: bool,
    toasts: Vec<Toast>,
}

/// In-memory toast stack, ordered by creation.
///
/// Renders nothing until the first toast arrives; from then on the
/// container element is always rendered, even when empty.
#[derive(Debug, Default)]
pub struct ToastContainer {
    state: Mutex<ContainerState>,
}

impl ToastContainer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ContainerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state().toasts.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.state().toasts.is_empty()
    }

    pub fn render_html(&self) -> String {
        let state = self.state();
        if !state.created {
            return String::new();
        }
        let inner: String = state.toasts.iter().map(Toast::to_html).collect();
        format!(r#"<div id="{}" class="{}">{}</div>"#, CONTAINER_ID, CONTAINER_CLASS, inner)
    }
}

impl NotificationSink for ToastContainer {
    fn append(&self, toast: Toast) {
        let mut state = self.state();
        state.created = true;
        state.toasts.push(toast);
    }

    fn fade(&self, id: u64) {
        if let Some(toast) = self.state().toasts.iter_mut().find(|t| t.id == id) {
            toast.fading = true;
        }
    }

    fn remove(&self, id: u64) {
        self.state().toasts.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toaster() -> (Arc<ToastContainer>, Toaster) {
        let container = Arc::new(ToastContainer::new());
        let toaster = Toaster::new(container.clone());
        (container, toaster)
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ToastKind::from("error"), ToastKind::Error);
        assert_eq!(ToastKind::from("warning"), ToastKind::Warning);
        assert_eq!(ToastKind::from("notice"), ToastKind::Info);
        assert_eq!(ToastKind::default(), ToastKind::Success);
        assert_eq!(ToastKind::Warning.bg_class(), "bg-yellow-500");
        assert_eq!(ToastKind::Info.icon_class(), "fa-info-circle");
    }

    #[test]
    fn test_container_renders_nothing_before_first_toast() {
        let container = ToastContainer::new();
        assert_eq!(container.render_html(), "");
    }

    #[test]
    fn test_toast_html_escapes_message() {
        let toast = Toast {
            id: 4,
            message: "Saved <Widget>".to_string(),
            kind: ToastKind::Success,
            duration: DEFAULT_TOAST_DURATION,
            fading: false,
        };
        let html = toast.to_html();
        assert!(html.starts_with(r#"<div class="mb-3 p-3 rounded-lg shadow-lg bg-green-500 text-white" data-toast-id="4">"#));
        assert!(html.contains("<span>Saved &lt;Widget&gt;</span>"));
        assert!(html.contains("fa-check-circle"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_fades_then_is_removed() {
        let (container, toaster) = toaster();
        let id = toaster.show_toast("Product saved", ToastKind::Success, None);

        assert_eq!(container.toasts().len(), 1);
        assert!(!container.toasts()[0].fading);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        let toasts = container.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
        assert!(toasts[0].fading);
        assert!(container.render_html().contains(FADE_CLASS));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(container.is_empty());
        assert_eq!(
            container.render_html(),
            r#"<div id="toast-container" class="fixed bottom-4 right-4 z-50"></div>"#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_stack_in_creation_order() {
        let (container, toaster) = toaster();
        let first = toaster.show_toast("first", ToastKind::Info, Some(Duration::from_millis(5000)));
        let second = toaster.show_toast("second", ToastKind::Error, Some(Duration::from_millis(1000)));

        let ids: Vec<u64> = container.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first, second]);

        tokio::time::sleep(Duration::from_millis(1400)).await;
        let ids: Vec<u64> = container.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_removes_early() {
        let (container, toaster) = toaster();
        let id = toaster.show_toast("Upload failed", ToastKind::Error, None);

        toaster.dismiss(id);
        assert!(container.is_empty());

        // The scheduled fade/remove on a dismissed toast is a no-op
        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert!(container.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_duration_is_configurable() {
        let container = Arc::new(ToastContainer::new());
        let config = Config {
            toast_duration_ms: 500,
            ..Config::default()
        };
        let toaster = Toaster::from_config(&config, container.clone());
        toaster.show_toast("quick", ToastKind::Warning, None);

        tokio::time::sleep(Duration::from_millis(801)).await;
        assert!(container.is_empty());
    }

    #[test]
    fn test_without_runtime_toast_stays_until_dismissed() {
        let (container, toaster) = toaster();
        let id = toaster.show_toast("offline", ToastKind::Info, None);
        assert_eq!(container.toasts().len(), 1);

        toaster.dismiss(id);
        assert!(container.is_empty());
    }
}
