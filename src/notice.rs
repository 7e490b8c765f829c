//! Transient user-facing notices ("toasts").
//!
//! Every user-initiated action reports its outcome as a [`Notice`]: a title, a one-line
//! description, and how long the client should keep it on screen.

use serde::Serialize;

/// Display duration for order table notices.
pub const TABLE_NOTICE_MS: u64 = 3000;
/// Display duration for feedback form notices.
pub const FEEDBACK_NOTICE_MS: u64 = 2000;

/// Severity; the client styles warnings differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    pub duration_ms: u64,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
            duration_ms: TABLE_NOTICE_MS,
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            description: description.into(),
            duration_ms: TABLE_NOTICE_MS,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
