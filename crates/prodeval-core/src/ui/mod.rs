//! Presentation helpers for evaluator pages.
//!
//! - `Toaster`/`ToastContainer`: transient notifications
//! - `format_date`, `escape_html`: text formatting
//! - `format_markdown`: restricted markdown for generated summaries
//! - `score_color`, `score_bg_color`: CSS classes for evaluation scores

pub mod format;
pub mod markdown;
pub mod score;
pub mod toast;

pub use format::{escape_html, format_date, DateFormat, MonthStyle, NumberStyle, INVALID_DATE};
pub use markdown::format_markdown;
pub use score::{score_bg_color, score_color, ScoreTier};
pub use toast::{NotificationSink, Toast, ToastContainer, ToastKind, Toaster};
