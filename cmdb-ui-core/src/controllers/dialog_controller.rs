//! Dialog visibility and mode state machine
//!
//! ```text
//!            open_create / open_edit / open_view
//!   Closed ───────────────────────────────────────▶ Open { Create | Edit | View }
//!     ▲                                                  │
//!     └──────────────────────── close ───────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::DialogMode;

/// Dialog state
#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<T> {
    Closed,
    Open {
        mode: DialogMode,
        title: String,
        /// `None` in create mode
        payload: Option<T>,
    },
}

impl<T> Default for DialogState<T> {
    fn default() -> Self {
        Self::Closed
    }
}

/// Holds visibility, mode and the record being edited or viewed
#[derive(Debug, Clone)]
pub struct DialogController<T> {
    state: DialogState<T>,
}

impl<T> Default for DialogController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DialogController<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
        }
    }

    /// Open an empty dialog for a new record
    pub fn open_create(&mut self, title: impl Into<String>) -> CoreResult<()> {
        self.open(DialogMode::Create, title.into(), None)
    }

    /// Open a dialog editing `data`
    pub fn open_edit(&mut self, title: impl Into<String>, data: T) -> CoreResult<()> {
        self.open(DialogMode::Edit, title.into(), Some(data))
    }

    /// Open a read-only dialog showing `data`
    pub fn open_view(&mut self, title: impl Into<String>, data: T) -> CoreResult<()> {
        self.open(DialogMode::View, title.into(), Some(data))
    }

    fn open(&mut self, mode: DialogMode, title: String, payload: Option<T>) -> CoreResult<()> {
        if let DialogState::Open { mode: current, .. } = &self.state {
            return Err(CoreError::InvalidTransition(format!(
                "cannot open a {} dialog while a {} dialog is open",
                mode.as_str(),
                current.as_str()
            )));
        }
        log::debug!("Opening {} dialog '{title}'", mode.as_str());
        self.state = DialogState::Open {
            mode,
            title,
            payload,
        };
        Ok(())
    }

    /// Close and drop the payload; no-op when already closed
    pub fn close(&mut self) {
        self.state = DialogState::Closed;
    }

    pub fn state(&self) -> &DialogState<T> {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    pub fn mode(&self) -> Option<DialogMode> {
        match self.state {
            DialogState::Open { mode, .. } => Some(mode),
            DialogState::Closed => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.state {
            DialogState::Open { title, .. } => Some(title),
            DialogState::Closed => None,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.state {
            DialogState::Open { payload, .. } => payload.as_ref(),
            DialogState::Closed => None,
        }
    }

    /// View mode: fields must not be edited
    pub fn is_read_only(&self) -> bool {
        self.mode() == Some(DialogMode::View)
    }
}
