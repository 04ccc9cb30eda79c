//! Dialog modes

use serde::{Deserialize, Serialize};

/// What an open dialog is being used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogMode {
    Create,
    Edit,
    View,
}

impl DialogMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
        }
    }
}
