//! Notification types shared by every controller

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Short label used by text front-ends
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warn => "Warning",
            Self::Error => "Error",
        }
    }
}
